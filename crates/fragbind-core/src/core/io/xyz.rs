use crate::core::models::molecule::Molecule;
use std::io::{self, Write};

/// Writes `molecule` in XYZ format.
///
/// The comment line carries the molecule name, net charge, and multiplicity so that
/// downstream solvers can pick them up, e.g. `lys-asp charge=0 multiplicity=1`.
pub fn write_xyz(molecule: &Molecule, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "{}", molecule.atom_count())?;
    writeln!(
        writer,
        "{} charge={} multiplicity={}",
        molecule.name(),
        molecule.charge(),
        molecule.multiplicity()
    )?;
    for atom in molecule.atoms() {
        writeln!(
            writer,
            "{:<2} {:>12.6} {:>12.6} {:>12.6}",
            atom.element, atom.position.x, atom.position.y, atom.position.z
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    #[test]
    fn write_xyz_writes_header_and_coordinates() {
        let mol = Molecule::new(
            "hf",
            vec![
                Atom::new("H", Point3::new(0.0, 0.0, 0.0)),
                Atom::new("F", Point3::new(0.917, 0.0, -1.5)),
            ],
            vec![],
            0,
            1,
        )
        .unwrap();

        let mut buffer = Vec::new();
        write_xyz(&mol, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], "hf charge=0 multiplicity=1");
        assert_eq!(
            lines[2],
            "H      0.000000     0.000000     0.000000"
        );
        assert_eq!(
            lines[3],
            "F      0.917000     0.000000    -1.500000"
        );
    }

    #[test]
    fn write_xyz_handles_empty_molecule() {
        let mol = Molecule::new("void", vec![], vec![], 0, 1).unwrap();
        let mut buffer = Vec::new();
        write_xyz(&mol, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "0\nvoid charge=0 multiplicity=1\n"
        );
    }
}
