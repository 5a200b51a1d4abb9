#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub code: char,
    pub position: [f64; 3],
    pub confidence: f64,
}

impl Residue {
    pub fn new(code: char, position: [f64; 3], confidence: f64) -> Self {
        Self {
            code,
            position,
            confidence,
        }
    }
}
