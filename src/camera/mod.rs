pub mod binding_list;
pub mod device_directory;
pub mod blink_directory;
