use nalgebra::DMatrix;
use std::io::Write;

/// Draw a lattice snapshot as text: `+` for up, `-` for down, `?` for
/// anything else, one row per line.
pub fn render_lattice<W: Write>(snapshot: &DMatrix<i8>, writer: &mut W) -> std::io::Result<()> {
    for row in snapshot.row_iter() {
        let line = row
            .iter()
            .map(|&s| match s {
                1 => "+",
                -1 => "-",
                _ => "?",
            })
            .collect::<Vec<&str>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
