pub mod toml_loader;

pub use toml_loader::{
    list_files_with_extension, load_all_toml_files, load_toml_to_paper_spec, parse_paper_spec,
};
