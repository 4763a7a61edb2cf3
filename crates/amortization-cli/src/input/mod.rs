pub mod extras;
pub mod file;
pub mod stdin;
