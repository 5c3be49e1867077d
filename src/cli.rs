//! Line-oriented front end used by the `edc-settings` binary.
//!
//! Each stdin line is parsed as one subcommand; `help` lists them.

use std::fmt::Write as _;

use clap::{Parser, Subcommand};

use crate::controller::{DisplayRange, DisplayState, SettingsEvent, UnitChangeNotification};
use crate::error::SettingsResult;
use crate::state::PresetField;
use crate::units::UnitSystem;

/// One line of input
#[derive(Debug, Parser)]
#[command(name = "edc", no_binary_name = true)]
#[command(about = "Enhanced driver camera settings")]
struct Line {
    #[command(subcommand)]
    command: LineCommand,
}

#[derive(Debug, Subcommand)]
enum LineCommand {
    /// Switch display units (metric or imperial)
    Units { units: UnitSystem },

    /// Raw unit-change notification, e.g. {"values":{"unitLengthSystem":"metric"}}
    Notify {
        #[arg(required = true, allow_hyphen_values = true)]
        json: Vec<String>,
    },

    /// Slider edit in display units
    Set {
        /// speedShakeMinSpeed, speedShakeMaxSpeed, fovMinSpeed or fovMaxSpeed
        field: PresetField,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Choose a preset
    Select {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Type into the new-preset name field
    Name {
        name: Vec<String>,
    },

    /// Save Custom as a preset (defaults to the name field)
    Create {
        name: Vec<String>,
    },

    /// Delete the selected user preset
    Delete,

    /// Reset the host's max FOV
    Reset,

    /// Print the current view
    Show,

    /// Exit
    #[command(alias = "exit")]
    Quit,
}

/// A parsed input line
#[derive(Debug)]
pub enum Command {
    Event(SettingsEvent),
    Quit,
}

pub fn parse_command(line: &str) -> SettingsResult<Command> {
    let Line { command } = Line::try_parse_from(line.split_whitespace())?;

    let event = match command {
        LineCommand::Units { units } => SettingsEvent::UnitsChanged(units),
        LineCommand::Notify { json } => {
            SettingsEvent::UnitNotification(UnitChangeNotification::from_json(&json.join(" "))?)
        }
        LineCommand::Set { field, value } => SettingsEvent::ParameterEdited { field, value },
        LineCommand::Select { name } => SettingsEvent::PresetSelected(name.join(" ")),
        LineCommand::Name { name } => SettingsEvent::PresetNameEdited(name.join(" ")),
        LineCommand::Create { name } if name.is_empty() => SettingsEvent::CreateFromNameField,
        LineCommand::Create { name } => SettingsEvent::CreatePreset(name.join(" ")),
        LineCommand::Delete => SettingsEvent::DeletePreset,
        LineCommand::Reset => SettingsEvent::ResetToDefaults,
        LineCommand::Show => SettingsEvent::Refresh,
        LineCommand::Quit => return Ok(Command::Quit),
    };
    Ok(Command::Event(event))
}

fn range_line(out: &mut String, label: &str, range: &DisplayRange, unit: &str) {
    let _ = writeln!(
        out,
        "  {label:<12} {:>4} - {:<4} {unit}",
        range.min_rounded, range.max_rounded
    );
}

/// Human-readable rendering of a display snapshot
pub fn render(view: &DisplayState) -> String {
    if view.load_error {
        return "Failed to load default settings. Preset settings will not work!\n".to_string();
    }
    if view.loading {
        return "Loading settings...\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Presets:");
    for name in &view.preset_names {
        let marker = if *name == view.chosen_preset { '*' } else { ' ' };
        let _ = writeln!(out, " {marker} {name}");
    }
    range_line(&mut out, "Speed shake", &view.speed_shake, view.unit_label);
    range_line(&mut out, "FOV", &view.fov, view.unit_label);
    if !view.is_default_preset {
        let _ = writeln!(out, "  (user preset: can be deleted)");
    }
    if !view.preset_name.is_empty() {
        let _ = writeln!(out, "  New preset name: {}", view.preset_name);
    }
    out
}
