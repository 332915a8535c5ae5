pub mod ini_file;

pub use ini_file::IniFile;
