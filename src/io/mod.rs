pub mod board_io;
pub mod gateway;
pub mod local;
pub mod remote;
pub mod saver;
pub mod seed;
pub mod state;
