#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A particle described by its physics rather than its raw record.
#[derive(Debug, Clone, Copy)]
pub struct Track {
    pub type_code: i32,
    pub charge: i32,
    pub rapidity: f64,
    pub pt: f64,
}

pub fn pion_plus(rapidity: f64, pt: f64) -> Track {
    Track {
        type_code: 101,
        charge: 1,
        rapidity,
        pt,
    }
}

const MASS: f64 = 0.138;

pub fn record(track: &Track) -> String {
    let mt = (MASS * MASS + track.pt * track.pt).sqrt();
    let energy = mt * track.rapidity.cosh();
    let pz = mt * track.rapidity.sinh();
    format!(
        "  0.0 0.0 0.0 0.0 {energy:e} {px:e} 0.0 {pz:e} {MASS} {t} 0 {c} 0 0 0",
        px = track.pt,
        t = track.type_code,
        c = track.charge
    )
}

fn preamble(out: &mut String, version: &str, energy: &str) {
    out.push_str(&format!("UQMD   version:   {version}  1000  {version}  output_file  15\n"));
    out.push_str("projectile:  (mass, char)  208  82   target:  (mass, char)  208  82\n");
    out.push_str("transformation betas (NN,lab,pro)     0.0000000  0.9942  -0.9942\n");
    out.push_str(concat!(
        "impact_parameter_real/min/max(fm):  3.20  0.00  4.00  ",
        "total_cross_section(mbarn):  0.00\n"
    ));
    out.push_str(&format!("cms  energies:  elab=  158.0  sqrt(s)=  {energy}\n"));
    for k in 6..=17 {
        out.push_str(&format!("header line {k}   0   0   0\n"));
    }
}

/// Renders a complete f15 stream.
pub fn f15(version: &str, energy: &str, events: &[Vec<Track>]) -> String {
    let mut out = String::new();
    for event in events {
        preamble(&mut out, version, energy);
        out.push_str(&format!("{}  0\n", event.len()));
        out.push_str("    0    0    0    0    0    0    0    0\n");
        for track in event {
            out.push_str(&record(track));
            out.push('\n');
        }
    }
    out
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
