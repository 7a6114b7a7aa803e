pub mod file_operations;
pub mod wallpaper;

pub use file_operations::{copy_wallpaper, ensure_output_dir, wallpaper_path};
pub use wallpaper::apply_wallpapers;
