// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Writing of Gromacs ndx index files for the prepared system.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{PipelineError, WriteError};
use crate::PANIC_MESSAGE;

/// Number of atom indices written per line of an ndx file.
const INDICES_PER_LINE: usize = 15;

/// Named groups of 1-based atom indices for a Gromacs ndx file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexGroups {
    groups: Vec<(String, Vec<usize>)>,
}

impl IndexGroups {
    /// Build `Receptor` and `Ligand` groups from the number of atoms of each
    /// molecule of the system.
    ///
    /// `protein` and `ligand` are the positions of the respective molecules
    /// in the system. Atoms are numbered sequentially starting from 1,
    /// following Gromacs conventions.
    pub fn receptor_ligand(
        atoms_per_molecule: &[usize],
        protein: usize,
        ligand: usize,
    ) -> Result<Self, PipelineError> {
        let mut receptor_atoms = Vec::new();
        let mut ligand_atoms = Vec::new();

        let mut counter = 1;
        for (i, &n_atoms) in atoms_per_molecule.iter().enumerate() {
            if i == protein {
                receptor_atoms.extend(counter..counter + n_atoms);
            } else if i == ligand {
                ligand_atoms.extend(counter..counter + n_atoms);
            }

            counter += n_atoms;
        }

        if receptor_atoms.is_empty() {
            return Err(PipelineError::EmptyIndexGroup("Receptor".to_owned()));
        }

        if ligand_atoms.is_empty() {
            return Err(PipelineError::EmptyIndexGroup("Ligand".to_owned()));
        }

        Ok(Self {
            groups: vec![
                ("Receptor".to_owned(), receptor_atoms),
                ("Ligand".to_owned(), ligand_atoms),
            ],
        })
    }

    /// Get the atom indices of a group, if it exists.
    pub fn group(&self, name: &str) -> Option<&[usize]> {
        self.groups
            .iter()
            .find(|(group, _)| group == name)
            .map(|(_, atoms)| atoms.as_slice())
    }

    /// Write the groups into an ndx file.
    ///
    /// If the target file already exists, it is backed up unless
    /// overwriting is requested.
    pub fn write(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), WriteError> {
        let path = path.as_ref();

        if path.exists() {
            if !overwrite {
                log::warn!(
                    "Output ndx file '{}' already exists. Backing it up.",
                    path.to_str().expect(PANIC_MESSAGE)
                );
                backitup::backup(path)
                    .map_err(|_| WriteError::CouldNotBackupFile(Box::from(path)))?;
            } else {
                log::warn!(
                    "Output ndx file '{}' already exists. It will be overwritten as requested.",
                    path.to_str().expect(PANIC_MESSAGE)
                );
            }
        }

        let file =
            File::create(path).map_err(|_| WriteError::CouldNotCreateFile(Box::from(path)))?;
        let mut writer = BufWriter::new(file);

        for (i, (name, atoms)) in self.groups.iter().enumerate() {
            if i > 0 {
                writeln!(writer).map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;
            }

            writeln!(writer, "[ {} ]", name)
                .map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;

            for chunk in atoms.chunks(INDICES_PER_LINE) {
                let line = chunk
                    .iter()
                    .map(|index| index.to_string())
                    .collect::<Vec<String>>()
                    .join(" ");

                writeln!(writer, "{}", line)
                    .map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;
            }
        }

        Ok(())
    }
}
