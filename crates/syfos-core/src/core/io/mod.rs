//! Reading and writing of force volumes, curves and parameter series as CSV.
//!
//! The layout is one column pair per curve (`<name>_x_values`, `<name>_y_values`), so a
//! force volume exported by [`csv::write_force_volume`] can be read back one curve at a
//! time with [`csv::read_curve`].

pub mod csv;
