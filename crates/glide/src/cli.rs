pub mod accel;
pub mod simulate;
