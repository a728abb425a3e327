pub mod console;
pub mod interrupts;
