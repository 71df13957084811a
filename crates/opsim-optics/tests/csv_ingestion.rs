//! CSV ingestion end to end: file on disk to literature curve.

use std::io::Write;

use tempfile::NamedTempFile;

use opsim_optics::dispersion::DispersionModel;
use opsim_optics::reader::{append_two_column_csv, read_two_column_csv};
use opsim_optics::sampling::{EnergyRange, Sampling};
use opsim_optics::units::{EV, M, NM};
use opsim_optics::build_curve;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

#[test]
fn test_one_malformed_row_in_five() {
    let file = csv_file("2.0,1.0\n3.0,2.0\nabc,1.0\n4.0,3.0\n5.0,4.0\n");
    let cols = read_two_column_csv(file.path(), EV, 1.0).unwrap();
    assert_eq!(cols.len(), 4);
    assert_eq!(cols.skipped, 1);
    assert_eq!(cols.x, vec![2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_append_refuses_non_empty_accumulators() {
    let file = csv_file("1,2\n3,4\n");
    let mut x = vec![9.0];
    let mut y = Vec::new();
    let n = append_two_column_csv(file.path(), 1.0, 1.0, &mut x, &mut y).unwrap();
    assert_eq!(n, 0);
    assert_eq!(x, vec![9.0]);
    assert!(y.is_empty());

    let mut x = Vec::new();
    let n = append_two_column_csv(file.path(), 1.0, 1.0, &mut x, &mut y).unwrap();
    assert_eq!(n, 2);
    assert_eq!(x, vec![1.0, 3.0]);
    assert_eq!(y, vec![2.0, 4.0]);
}

#[test]
fn test_wavelength_file_becomes_energy_curve() {
    // Absorption length in metres against ascending wavelength.
    let file = csv_file("300,0.5\n400,2\n500,4\n");
    let table = read_two_column_csv(file.path(), NM, M)
        .unwrap()
        .into_table_from_wavelengths()
        .unwrap();
    let curve = build_curve(
        &DispersionModel::Table(table),
        &EnergyRange::global(),
        &Sampling::Count(2),
    )
    .unwrap();

    // 500 nm..300 nm is 2.48..4.13 eV, so both sentinels are added.
    assert_eq!(curve.len(), 5);
    assert_eq!(curve.values(), &[4000.0, 4000.0, 2000.0, 500.0, 500.0]);
}
