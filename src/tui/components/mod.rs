//! UI components for the Parley shell.
//!
//! Components with persistent state follow the "state struct + transient
//! wrapper" pattern: the `*State` lives in `TuiState` across frames, the
//! wrapper is created each frame with borrowed state and props.

pub mod input_box;
pub mod landing;
pub mod message_list;
pub mod model_picker;
pub mod param_panel;
pub mod template_picker;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use landing::Landing;
pub use message_list::{MessageList, MessageListState};
pub use model_picker::{ModelPicker, ModelPickerEvent, ModelPickerState};
pub use param_panel::{ParamPanel, ParamPanelEvent, ParamPanelState};
pub use template_picker::{TemplatePicker, TemplatePickerEvent, TemplatePickerState};
pub use title_bar::TitleBar;
