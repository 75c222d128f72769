pub mod window;

pub use window::{HistoryWindow, RangePreset, RangeStep, StepMode, WindowOptions};
