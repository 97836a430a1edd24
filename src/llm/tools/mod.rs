pub mod dispatcher;
mod tool;
pub mod weather_tool;

pub use dispatcher::{ToolDispatcher, UNKNOWN_TOOL};
pub use tool::{FunctionDescriptor, LlmTool, ToolDescriptor};
pub use weather_tool::{GetWeatherTool, GET_WEATHER_TOOL_NAME};
