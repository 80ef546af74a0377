use std::io::{self, Write};
use std::path::Path;

use crate::panel::solver::PanelSolution;
use crate::stream::Streamline;

/// Write the surface distribution, one row per panel.
///
/// Columns: panel, x, y (control point), cp, vt (m/s), tau (Pa).
/// `shear` may be shorter than the panel list; missing values are written
/// as 0.
pub fn write_surface<W: Write>(
    writer: &mut W,
    solution: &PanelSolution,
    shear: &[f64],
) -> io::Result<()> {
    writeln!(writer, "panel,x,y,cp,vt,tau")?;

    for (i, panel) in solution.panels.iter().enumerate() {
        writeln!(
            writer,
            "{},{:.6},{:.6},{:.6},{:.4},{:.6}",
            i,
            panel.control.x,
            panel.control.y,
            solution.pressure_coefficient[i],
            solution.tangential_velocity[i],
            shear.get(i).copied().unwrap_or(0.0),
        )?;
    }

    Ok(())
}

pub fn write_surface_file(
    path: impl AsRef<Path>,
    solution: &PanelSolution,
    shear: &[f64],
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_surface(&mut file, solution, shear)?;
    file.flush()
}

/// Write streamline points. Columns: line, index, x, y.
pub fn write_streamlines<W: Write>(writer: &mut W, lines: &[Streamline]) -> io::Result<()> {
    writeln!(writer, "line,index,x,y")?;

    for (l, line) in lines.iter().enumerate() {
        for (i, p) in line.points.iter().enumerate() {
            writeln!(writer, "{},{},{:.6},{:.6}", l, i, p.x, p.y)?;
        }
    }

    Ok(())
}

pub fn write_streamlines_file(path: impl AsRef<Path>, lines: &[Streamline]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_streamlines(&mut file, lines)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::{build_contour, generate_airfoil, presets};
    use crate::panel::solver::solve_panel_method;
    use crate::stream::Termination;
    use nalgebra::Point2;

    #[test]
    fn surface_csv_has_header_and_rows() {
        let contour = build_contour(&generate_airfoil(&presets::naca0012()));
        let sol = solve_panel_method(&contour, 30.0, 0.0);
        let shear = vec![1.5; sol.len()];

        let mut buf = Vec::new();
        write_surface(&mut buf, &sol, &shear).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "panel,x,y,cp,vt,tau");
        assert_eq!(lines.len(), sol.len() + 1);
        assert!(lines[1].starts_with("0,"));
        assert!(lines[1].ends_with(",1.500000"));
        assert_eq!(lines[1].split(',').count(), 6);
    }

    #[test]
    fn streamline_csv_numbers_lines_and_points() {
        let line = Streamline {
            seed: Point2::new(0.0, 0.0),
            points: vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.25)],
            termination: Termination::LeftDomain,
        };
        let mut buf = Vec::new();
        write_streamlines(&mut buf, &[line.clone(), line]).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "0,1,0.500000,0.250000");
        assert_eq!(lines[3], "1,0,0.000000,0.000000");
    }
}
