pub mod char_grid;
