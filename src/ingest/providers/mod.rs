pub mod reddit_atom;
