//! Single-choice profile selection

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::io::{self, IsTerminal};

use super::Profile;
use crate::common::{Error, Result};

/// Picks one profile out of several candidates
pub trait Chooser {
    /// Index of the chosen profile, or `None` when the user cancels
    fn choose(&self, profiles: &[Profile]) -> Option<usize>;
}

/// Interactive selection list on the terminal
///
/// Cancels when stdin is not a terminal, on Esc/q, or when the prompt
/// cannot be drawn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn choose(&self, profiles: &[Profile]) -> Option<usize> {
        if !io::stdin().is_terminal() {
            tracing::debug!("stdin is not a terminal, cannot prompt for a profile");
            return None;
        }

        let items: Vec<String> = profiles.iter().map(choice_label).collect();
        match Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select Jest Configuration")
            .items(&items)
            .default(0)
            .interact_opt()
        {
            Ok(choice) => choice,
            Err(e) => {
                tracing::debug!("Profile prompt failed: {e}");
                None
            }
        }
    }
}

/// One line per profile: name, default config and working directory
fn choice_label(profile: &Profile) -> String {
    format!(
        "{}  (Config: {}, Working Dir: {})",
        profile.display_name(),
        profile.default_jest_config_path.as_deref().unwrap_or_default(),
        profile.default_cwd.as_deref().unwrap_or_default(),
    )
}

/// Chooser for non-interactive use; always cancels
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChooser;

impl Chooser for NoChooser {
    fn choose(&self, _profiles: &[Profile]) -> Option<usize> {
        None
    }
}

/// Pick the profile to resolve
///
/// A requested name must match exactly. Otherwise a single candidate is used
/// directly and several candidates go to the chooser.
pub fn choose_profile(
    mut profiles: Vec<Profile>,
    requested: Option<&str>,
    chooser: &dyn Chooser,
) -> Result<Profile> {
    if profiles.is_empty() {
        return Err(Error::NoProfiles);
    }

    if let Some(name) = requested {
        return match profiles.iter().position(|p| p.name.as_deref() == Some(name)) {
            Some(i) => Ok(profiles.swap_remove(i)),
            None => {
                let names: Vec<&str> = profiles.iter().map(Profile::display_name).collect();
                Err(Error::profile_not_found(name, &names))
            }
        };
    }

    if profiles.len() == 1 {
        return Ok(profiles.swap_remove(0));
    }

    match chooser.choose(&profiles) {
        Some(i) if i < profiles.len() => Ok(profiles.swap_remove(i)),
        _ => Err(Error::SelectionCancelled),
    }
}
