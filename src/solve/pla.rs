//! Berkeley PLA export of the observed table
//!
//! Writes one cube per observed row in `.type fr` form, so the table can be handed
//! to an external minimizer such as espresso. Listed `1`s are the on-set and listed
//! `0`s the off-set; minterms that never appear stay don't-care, as they do for
//! the built-in minimizer. Inputs are the function variables (primary inputs, then
//! state bits, variable 0 first); outputs are the solver's columns, with `-` where
//! a row leaves a column unspecified.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::Solver;

impl Solver<'_> {
    /// Write the table in PLA format
    pub fn write_pla<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let columns = self.columns();
        let num_vars = self.num_variables();

        writeln!(writer, ".type fr")?;
        writeln!(writer, ".i {}", num_vars)?;
        write!(writer, ".ilb")?;
        for label in self.variable_names() {
            write!(writer, " {}", label)?;
        }
        writeln!(writer)?;

        writeln!(writer, ".o {}", columns.len())?;
        write!(writer, ".ob")?;
        for &column in &columns {
            write!(writer, " {}", self.column_name(column))?;
        }
        writeln!(writer)?;

        let rows: Vec<_> = self
            .table
            .rows()
            .filter_map(|row| self.minterm(row.state, row.input).map(|m| (m, row)))
            .collect();
        writeln!(writer, ".p {}", rows.len())?;

        for (minterm, row) in rows {
            for i in 0..num_vars {
                write!(writer, "{}", if minterm >> i & 1 == 1 { '1' } else { '0' })?;
            }
            write!(writer, " ")?;
            for &column in &columns {
                let c = match self.row_label(column, row.outputs, row.state, row.next) {
                    Some(true) => '1',
                    Some(false) => '0',
                    None => '-',
                };
                write!(writer, "{}", c)?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, ".end")?;
        Ok(())
    }

    /// The PLA text as a string
    pub fn to_pla_string(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the PLA to a file
    pub fn to_pla_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer)?;
        writer.flush()
    }
}
