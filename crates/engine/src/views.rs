// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The four text views kept in sync with the model.

use bw_core::ScriptDefinition;
use bw_script::{debug_config, input_json, render_with, to_json, GeneratorConfig};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Views {
    pub script: String,
    pub json: String,
    pub debug_config: String,
    pub input_json: String,
}

impl Views {
    pub fn render(definition: &ScriptDefinition, config: &GeneratorConfig) -> Self {
        let json = match to_json(definition) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "JSON generation failed");
                format!("something went wrong. {e}")
            }
        };
        Self {
            script: render_with(definition, config),
            json,
            debug_config: debug_config(definition, &config.script_dir),
            input_json: input_json(definition),
        }
    }
}
