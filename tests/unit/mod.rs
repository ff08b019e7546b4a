mod names;
mod verify;
