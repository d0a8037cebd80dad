use pda_inbound_common::{Event, Screen, Session};

/// Text fields the numpad can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    EmployeeId,
    Password,
    Mid,
    Search,
    Weight,
    StorageCode,
    DetailWeight,
    DetailStorageCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadKey {
    Digit(char),
    Backspace,
    Enter,
}

/// Numpad keys with their letter legends, row by row.
pub const PAD_ROWS: [[(PadKey, &str); 3]; 4] = [
    [(PadKey::Digit('1'), ".,?"), (PadKey::Digit('2'), "ABC"), (PadKey::Digit('3'), "DEF")],
    [(PadKey::Digit('4'), "GHI"), (PadKey::Digit('5'), "JKL"), (PadKey::Digit('6'), "MNO")],
    [(PadKey::Digit('7'), "PQRS"), (PadKey::Digit('8'), "TUV"), (PadKey::Digit('9'), "WXYZ")],
    [(PadKey::Backspace, ""), (PadKey::Digit('0'), "_"), (PadKey::Enter, "")],
];

impl PadKey {
    pub fn label(self) -> String {
        match self {
            PadKey::Digit(d) => d.to_string(),
            PadKey::Backspace => "DEL".to_string(),
            PadKey::Enter => "OK".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Last focused text field; numpad input goes here.
    pub focus: Option<Field>,
}

/// Current content of a field, if the field exists on the active screen.
pub fn field_value(session: &Session, field: Field) -> Option<String> {
    match (session.screen(), field) {
        (Screen::Login(login), Field::EmployeeId) => Some(login.employee_id.clone()),
        (Screen::Login(login), Field::Password) => Some(login.password.clone()),
        (Screen::Dashboard(dash), Field::Mid) => Some(dash.mid_input.clone()),
        (Screen::Dashboard(dash), Field::Search) => Some(dash.search_query.clone()),
        (Screen::Capture(flow), Field::Weight) => Some(flow.weight.clone()),
        (Screen::Capture(flow), Field::StorageCode) => Some(flow.storage_code.clone()),
        (Screen::Detail(edit), Field::DetailWeight) => Some(edit.weight.clone()),
        (Screen::Detail(edit), Field::DetailStorageCode) => Some(edit.storage_code.clone()),
        _ => None,
    }
}

/// Event that writes `text` into `field`.
pub fn input_event(field: Field, text: String) -> Event {
    match field {
        Field::EmployeeId => Event::EmployeeIdInput(text),
        Field::Password => Event::PasswordInput(text),
        Field::Mid => Event::MidInput(text),
        Field::Search => Event::SearchInput(text),
        Field::Weight => Event::WeightInput(text),
        Field::StorageCode => Event::StorageCodeInput(text),
        Field::DetailWeight => Event::DetailWeightInput(text),
        Field::DetailStorageCode => Event::DetailStorageCodeInput(text),
    }
}

/// Event fired by Enter in `field`, if any.
pub fn submit_event(field: Field) -> Option<Event> {
    match field {
        Field::EmployeeId | Field::Password => Some(Event::LoginSubmit),
        Field::Mid => Some(Event::MidSubmit),
        Field::StorageCode => Some(Event::StorageSubmit),
        Field::Search | Field::Weight | Field::DetailWeight | Field::DetailStorageCode => None,
    }
}

/// Translate a numpad press into session events for the focused field.
pub fn pad_events(session: &Session, focus: Option<Field>, key: PadKey) -> Vec<Event> {
    let Some(field) = focus else {
        return Vec::new();
    };
    let Some(mut value) = field_value(session, field) else {
        return Vec::new();
    };
    match key {
        PadKey::Digit(d) => {
            value.push(d);
            vec![input_event(field, value)]
        }
        PadKey::Backspace => {
            value.pop();
            vec![input_event(field, value)]
        }
        PadKey::Enter => submit_event(field).into_iter().collect(),
    }
}
