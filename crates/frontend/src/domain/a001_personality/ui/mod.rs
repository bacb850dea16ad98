mod picker;

pub use picker::PersonalityPicker;
