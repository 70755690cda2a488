pub mod formatter;

pub use formatter::{
    format_colors, format_errors, format_page, format_preset_list, format_section_list,
    format_status, format_visibility_table, should_use_colors,
};
