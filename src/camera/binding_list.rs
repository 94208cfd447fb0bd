use crate::camera::device_directory::DeviceCandidate;
use crate::core::console::Console;
use crate::errors::AppError;
use crate::settings::document::Binding;
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const NO_CAMERAS_MARKER: &str = "<NO CAMERAS CONFIGURED>";

/// What the operator typed at the "add camera" picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerChoice {
    /// `0`, `q` or `Q`: nothing to add.
    Finished,
    /// Zero-based index into the candidate list.
    Candidate(usize),
    /// Out of range or not a number; treated as a no-op.
    Ignored,
}

pub fn parse_picker_choice(input: &str, candidate_count: usize) -> PickerChoice {
    let input = input.trim();
    if input == "0" || input.eq_ignore_ascii_case("q") {
        return PickerChoice::Finished;
    }
    match input.parse::<usize>() {
        Ok(num) if num >= 1 && num <= candidate_count => PickerChoice::Candidate(num - 1),
        _ => PickerChoice::Ignored,
    }
}

/// Ordered camera → upload token bindings. Duplicates are allowed: one
/// camera may feed several upload destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraBindingList {
    bindings: Vec<Binding>,
}

impl CameraBindingList {
    pub fn new(bindings: Vec<Binding>) -> Self {
        CameraBindingList { bindings }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn as_slice(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn push(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Shows `candidates` as a numbered menu and appends a binding for the
    /// chosen one. Returns `true` if a binding was added.
    pub fn add(&mut self, candidates: &[DeviceCandidate], console: &mut dyn Console) -> Result<bool, AppError> {
        console.say("");
        console.say("Add camera for upload");
        console.say("");
        for (n, candidate) in candidates.iter().enumerate() {
            console.say(&format!("    [ {} ] - {} sn={}", n + 1, candidate.name, candidate.id));
        }

        let answer = console.read_line("\nEnter camera number to upload, Q if finished adding: ")?;
        match parse_picker_choice(&answer, candidates.len()) {
            PickerChoice::Candidate(idx) => {
                let candidate = &candidates[idx];
                let token = console.read_line(&format!("Enter the token for the \"{}\" camera: ", candidate.name))?;
                self.bindings.push(Binding::new(&candidate.name, &candidate.id, token.trim()));
                info!("➕ Bound camera '{}' (sn={}) as entry #{}", candidate.name, candidate.id, self.bindings.len());
                Ok(true)
            }
            PickerChoice::Finished => {
                debug!("Add picker closed without a selection");
                Ok(false)
            }
            PickerChoice::Ignored => {
                debug!("Ignoring add picker input '{}' ({} candidates)", answer, candidates.len());
                Ok(false)
            }
        }
    }

    /// Removes the binding at 1-based `index`; out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Binding> {
        if index >= 1 && index <= self.bindings.len() {
            let removed = self.bindings.remove(index - 1);
            info!("➖ Removed binding #{} for camera '{}'", index, removed.device_name);
            Some(removed)
        } else {
            debug!("Ignoring removal of #{} from a list of {}", index, self.bindings.len());
            None
        }
    }

    /// Renders one line per binding, or the empty-list marker.
    pub fn display(&self, as_menu: bool) -> Vec<String> {
        if self.bindings.is_empty() {
            return vec![NO_CAMERAS_MARKER.to_string()];
        }
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, binding)| {
                let number = if as_menu { format!("[ {} ]", i + 1) } else { (i + 1).to_string() };
                format!("    {} - \"{}\" with token {}", number, binding.device_name, binding.upload_token)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::scripted::ScriptedConsole;

    fn candidates() -> Vec<DeviceCandidate> {
        vec![
            DeviceCandidate::new("Porch", "SN123"),
            DeviceCandidate::new("Garage", "SN456"),
        ]
    }

    fn list_of(names: &[&str]) -> CameraBindingList {
        CameraBindingList::new(
            names.iter().enumerate().map(|(i, n)| Binding::new(*n, format!("SN{}", i), format!("tok{}", i))).collect(),
        )
    }

    #[test]
    fn picker_choice_parsing() {
        assert_eq!(parse_picker_choice("q", 2), PickerChoice::Finished);
        assert_eq!(parse_picker_choice("Q", 2), PickerChoice::Finished);
        assert_eq!(parse_picker_choice("0", 2), PickerChoice::Finished);
        assert_eq!(parse_picker_choice(" 2 ", 2), PickerChoice::Candidate(1));
        assert_eq!(parse_picker_choice("3", 2), PickerChoice::Ignored);
        assert_eq!(parse_picker_choice("-1", 2), PickerChoice::Ignored);
        assert_eq!(parse_picker_choice("porch", 2), PickerChoice::Ignored);
        assert_eq!(parse_picker_choice("", 2), PickerChoice::Ignored);
    }

    #[test]
    fn add_with_quit_sentinel_leaves_list_unchanged() {
        let mut list = list_of(&["Porch"]);
        let mut console = ScriptedConsole::new(["Q"]);
        assert!(!list.add(&candidates(), &mut console).unwrap());
        assert_eq!(list.len(), 1);
        assert_eq!(console.remaining_answers(), 0);
    }

    #[test]
    fn add_appends_selected_candidate_with_token() {
        let mut list = CameraBindingList::default();
        let mut console = ScriptedConsole::new(["2", "tok-garage"]);
        assert!(list.add(&candidates(), &mut console).unwrap());
        assert_eq!(list.as_slice(), &[Binding::new("Garage", "SN456", "tok-garage")]);
        assert!(console.mentions("Enter the token for the \"Garage\" camera"));
    }

    #[test]
    fn add_ignores_out_of_range_and_garbage() {
        let mut list = CameraBindingList::default();
        let mut console = ScriptedConsole::new(["7", "abc"]);
        assert!(!list.add(&candidates(), &mut console).unwrap());
        assert!(!list.add(&candidates(), &mut console).unwrap());
        assert!(list.is_empty());
    }

    #[test]
    fn add_permits_duplicate_devices() {
        let mut list = CameraBindingList::default();
        let mut console = ScriptedConsole::new(["1", "a", "1", "b"]);
        list.add(&candidates(), &mut console).unwrap();
        list.add(&candidates(), &mut console).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[0].device_id, list.as_slice()[1].device_id);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut list = list_of(&["A", "B"]);
        assert!(list.remove(0).is_none());
        assert!(list.remove(3).is_none());
        assert_eq!(list, list_of(&["A", "B"]));
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut list = list_of(&["A", "B", "C"]);
        let removed = list.remove(2).unwrap();
        assert_eq!(removed.device_name, "B");
        let names: Vec<_> = list.iter().map(|b| b.device_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn display_styles_and_empty_marker() {
        assert_eq!(CameraBindingList::default().display(true), vec![NO_CAMERAS_MARKER.to_string()]);
        let list = list_of(&["Porch"]);
        assert_eq!(list.display(true), vec!["    [ 1 ] - \"Porch\" with token tok0".to_string()]);
        assert_eq!(list.display(false), vec!["    1 - \"Porch\" with token tok0".to_string()]);
    }
}
