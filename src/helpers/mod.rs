//! View helpers: server and route URLs, the html tag, navigation filtering

pub mod doctype;
pub mod html_tag;
pub mod navigation;
pub mod server_url;
pub mod url;

pub use doctype::*;
pub use html_tag::*;
pub use navigation::*;
pub use server_url::*;
pub use url::*;
