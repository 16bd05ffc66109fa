//! # Overwrite Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! ## Overview
//!
//! Implementations of [`OverwriteDecider`] for the `--overwrite` policies:
//!
//! - `always` / `never`: a [`FixedAnswer`] that never asks.
//! - `ask`: [`ConfirmOverwrite`], a yes/no `dialoguer` prompt per existing
//!   file. When no terminal is available the prompt cannot be shown and the
//!   file is kept.
//!
use crate::core::config::OverwritePolicy;
use crate::core::materializer::OverwriteDecider;
use dialoguer::Confirm;
use std::path::Path;
use tracing::{debug, warn};

/// Answers every overwrite question the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl OverwriteDecider for FixedAnswer {
    fn should_overwrite(&mut self, path: &Path) -> bool {
        debug!(
            "{} existing file {:?} without asking",
            if self.0 { "Overwriting" } else { "Keeping" },
            path
        );
        self.0
    }
}

/// Asks on the terminal before replacing each existing file.
#[derive(Debug, Default)]
pub struct ConfirmOverwrite;

impl OverwriteDecider for ConfirmOverwrite {
    fn should_overwrite(&mut self, path: &Path) -> bool {
        let answer = Confirm::new()
            .with_prompt(format!(
                "File '{}' already exists. Overwrite it with an empty file?",
                path.display()
            ))
            .default(false)
            .interact();
        match answer {
            Ok(choice) => choice,
            Err(e) => {
                warn!(
                    "Could not ask about {:?} ({}); keeping the existing file",
                    path, e
                );
                false
            }
        }
    }
}

/// Builds the decider for `policy`.
pub fn decider_for(policy: OverwritePolicy) -> Box<dyn OverwriteDecider> {
    match policy {
        OverwritePolicy::Ask => Box::new(ConfirmOverwrite),
        OverwritePolicy::Always => Box::new(FixedAnswer(true)),
        OverwritePolicy::Never => Box::new(FixedAnswer(false)),
    }
}
