pub mod eltoque;

pub use eltoque::ElToqueProvider;
