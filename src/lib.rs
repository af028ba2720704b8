pub mod sortphotos_core;
