pub mod handlers;
pub mod header;
pub mod modality_tabs;
pub mod preview_area;
pub mod results;
pub mod service_status;
pub mod upload_section;
pub mod utils;
