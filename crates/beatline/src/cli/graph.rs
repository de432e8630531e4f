//! Graph listing command handler.

use super::setup;
use beatline::{BeatlineResult, END_OF_SCRIPT};
use std::path::Path;

/// Print one line per clip slot with its branch targets.
pub fn print_graph(path: &Path) -> BeatlineResult<()> {
    let script = setup::load_script(path)?;

    for (index, slot) in script.slots().iter().enumerate() {
        match slot {
            Some(clip) => {
                let targets: Vec<String> = clip
                    .targets()
                    .into_iter()
                    .map(|target| {
                        if target == END_OF_SCRIPT {
                            "end".to_string()
                        } else {
                            target.to_string()
                        }
                    })
                    .collect();
                println!(
                    "{:>3}  {:<11} {:<24} -> {}",
                    index,
                    clip.kind(),
                    clip.name(),
                    targets.join(", ")
                );
            }
            None => println!("{:>3}  <empty>", index),
        }
    }

    Ok(())
}
