//! Test-only construction of small indexes.
//!
//! Builds the padded k-spectrum of a handful of sequences by brute force,
//! sorts it colexicographically and derives the per-symbol edge bit vectors
//! and the suffix-group marks. Lexicographic indexes are built over the
//! reversed sequences.

use std::collections::{BTreeSet, HashMap};

use sucds::bit_vectors::BitVector;

use crate::alphabet::{Symbol, SIGMA};
use crate::builder::SbwtBuilder;
use crate::index::SbwtIndex;

pub(crate) fn bits(pattern: &str) -> BitVector {
    BitVector::from_bits(pattern.bytes().map(|b| b == b'1'))
}

pub(crate) fn rows(patterns: [&str; SIGMA]) -> [BitVector; SIGMA] {
    patterns.map(bits)
}

/// The 3-mers of `ACGT`: columns `$$$`, `$$A`, `$AC`, `ACG`, `CGT`.
pub(crate) fn acgt_index() -> SbwtIndex {
    SbwtBuilder::new()
        .k(3)
        .n_kmers(2)
        .streaming_support(bits("11111"))
        .build_from_bit_vectors(rows(["10000", "01000", "00100", "00010"]))
        .unwrap()
}

/// Distinct k-mers over {A,C,G,T} of the upper-cased sequences.
pub(crate) fn kmer_set(seqs: &[&[u8]], k: usize) -> BTreeSet<Vec<u8>> {
    let mut kmers = BTreeSet::new();
    for seq in seqs {
        let seq = seq.to_ascii_uppercase();
        if seq.len() < k {
            continue;
        }
        for window in seq.windows(k) {
            if window.iter().all(|c| Symbol::from_ascii(*c).is_some()) {
                kmers.insert(window.to_vec());
            }
        }
    }
    kmers
}

fn colex_cmp(a: &[u8], b: &[u8]) -> std::cmp::Ordering {
    a.iter().rev().cmp(b.iter().rev())
}

/// Nodes of the padded k-spectrum in colexicographic order.
pub(crate) fn padded_spectrum(kmers: &BTreeSet<Vec<u8>>, k: usize) -> Vec<Vec<u8>> {
    let suffixes: BTreeSet<&[u8]> = kmers.iter().map(|x| &x[1..]).collect();

    let mut nodes: BTreeSet<Vec<u8>> = kmers.clone();
    nodes.insert(vec![b'$'; k]);
    for x in kmers {
        if suffixes.contains(&x[..k - 1]) {
            continue;
        }
        // source k-mer: add its $-padded proper prefixes
        for len in 1..k {
            let mut dummy = vec![b'$'; k - len];
            dummy.extend_from_slice(&x[..len]);
            nodes.insert(dummy);
        }
    }

    let mut nodes: Vec<Vec<u8>> = nodes.into_iter().collect();
    nodes.sort_by(|a, b| colex_cmp(a, b));
    nodes
}

/// Builds an index over the k-mers of `seqs` the way the external pipeline would.
pub(crate) fn build_index(seqs: &[&[u8]], k: usize, colex: bool) -> SbwtIndex {
    let reversed: Vec<Vec<u8>> = seqs.iter().map(|s| s.iter().rev().copied().collect()).collect();
    let source: Vec<&[u8]> = if colex {
        seqs.to_vec()
    } else {
        reversed.iter().map(Vec::as_slice).collect()
    };

    let kmers = kmer_set(&source, k);
    let nodes = padded_spectrum(&kmers, k);
    let position: HashMap<&[u8], usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.as_slice(), i))
        .collect();

    let mut rows = vec![vec![false; nodes.len()]; SIGMA];
    for y in nodes.iter().skip(1) {
        // keep only the edge from the colexicographically smallest predecessor
        let pred = [b'$', b'A', b'C', b'G', b'T'].iter().find_map(|a| {
            let mut x = vec![*a];
            x.extend_from_slice(&y[..k - 1]);
            position.get(x.as_slice()).copied()
        });
        let symbol = Symbol::from_ascii(y[k - 1]).unwrap();
        rows[symbol.index()][pred.unwrap()] = true;
    }

    let marks: Vec<bool> = (0..nodes.len())
        .map(|i| i == 0 || nodes[i][1..] != nodes[i - 1][1..])
        .collect();

    let mut rows = rows.into_iter().map(BitVector::from_bits);
    let rows = [
        rows.next().unwrap(),
        rows.next().unwrap(),
        rows.next().unwrap(),
        rows.next().unwrap(),
    ];

    SbwtBuilder::new()
        .k(k)
        .n_kmers(kmers.len())
        .colex(colex)
        .streaming_support(BitVector::from_bits(marks))
        .build_from_bit_vectors(rows)
        .unwrap()
}

#[test]
fn test_padded_spectrum_of_acgt() {
    let kmers = kmer_set(&[b"ACGT".as_slice()], 3);
    let nodes = padded_spectrum(&kmers, 3);
    let expected: Vec<Vec<u8>> = ["$$$", "$$A", "$AC", "ACG", "CGT"]
        .iter()
        .map(|s| s.as_bytes().to_vec())
        .collect();
    assert_eq!(nodes, expected);
}

#[test]
fn test_build_index_matches_fixture() {
    let built = build_index(&[b"ACGT".as_slice()], 3, true);
    let fixture = acgt_index();
    assert_eq!(built.c_array(), fixture.c_array());
    assert_eq!(built.n_nodes(), fixture.n_nodes());
    for col in 0..fixture.n_nodes() {
        assert_eq!(
            built.subset_rank().subset(col),
            fixture.subset_rank().subset(col)
        );
    }
}
