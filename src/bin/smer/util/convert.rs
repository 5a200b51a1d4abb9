use shapemer::KmerSpread;
use shapemer::io::AtomSelector;

use crate::cli::Atom;

impl From<Atom> for AtomSelector {
    fn from(atom: Atom) -> Self {
        match atom {
            Atom::N => AtomSelector::N,
            Atom::Ca => AtomSelector::Ca,
            Atom::Cb => AtomSelector::Cb,
        }
    }
}

pub fn spread_display_name(spread: KmerSpread) -> &'static str {
    match spread {
        KmerSpread::Window => "window",
        KmerSpread::Anchor => "anchor (legacy)",
    }
}
