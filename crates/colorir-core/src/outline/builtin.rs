//! The outlines every session starts with.

use super::{OutlineContent, OutlineDocument};

const SUN: &str = r#"<svg viewBox="0 0 200 200" xmlns="http://www.w3.org/2000/svg">
  <!-- Sun circle -->
  <circle fill="none" stroke="black" strokeWidth="2" cx="100" cy="100" r="40" />
  <!-- Sun rays -->
  <path fill="none" stroke="black" strokeWidth="2" d="M100,40 L100,20" />
  <path fill="none" stroke="black" strokeWidth="2" d="M100,180 L100,160" />
  <path fill="none" stroke="black" strokeWidth="2" d="M40,100 L20,100" />
  <path fill="none" stroke="black" strokeWidth="2" d="M180,100 L160,100" />
  <path fill="none" stroke="black" strokeWidth="2" d="M60,60 L45,45" />
  <path fill="none" stroke="black" strokeWidth="2" d="M140,60 L155,45" />
  <path fill="none" stroke="black" strokeWidth="2" d="M60,140 L45,155" />
  <path fill="none" stroke="black" strokeWidth="2" d="M140,140 L155,155" />
  <!-- Sun face -->
  <circle fill="none" stroke="black" strokeWidth="2" cx="85" cy="90" r="5" />
  <circle fill="none" stroke="black" strokeWidth="2" cx="115" cy="90" r="5" />
  <path fill="none" stroke="black" strokeWidth="2" d="M80,115 Q100,130 120,115" />
</svg>"#;

const HOUSE: &str = r#"<svg viewBox="0 0 200 200" xmlns="http://www.w3.org/2000/svg">
  <!-- Walls -->
  <rect fill="none" stroke="black" strokeWidth="2" x="40" y="80" width="120" height="100" />
  <!-- Roof -->
  <path fill="none" stroke="black" strokeWidth="2" d="M30,80 L100,20 L170,80" />
  <!-- Door and knob -->
  <rect fill="none" stroke="black" strokeWidth="2" x="85" y="130" width="30" height="50" />
  <circle fill="none" stroke="black" strokeWidth="2" cx="105" cy="155" r="3" />
  <!-- Left window -->
  <rect fill="none" stroke="black" strokeWidth="2" x="55" y="100" width="25" height="25" />
  <path fill="none" stroke="black" strokeWidth="2" d="M55,112.5 L80,112.5" />
  <path fill="none" stroke="black" strokeWidth="2" d="M67.5,100 L67.5,125" />
  <!-- Right window -->
  <rect fill="none" stroke="black" strokeWidth="2" x="120" y="100" width="25" height="25" />
  <path fill="none" stroke="black" strokeWidth="2" d="M120,112.5 L145,112.5" />
  <path fill="none" stroke="black" strokeWidth="2" d="M132.5,100 L132.5,125" />
  <!-- Chimney -->
  <path fill="none" stroke="black" strokeWidth="2" d="M130,50 L130,20 L150,20 L150,60" />
</svg>"#;

const CAR: &str = r#"<svg viewBox="0 0 200 200" xmlns="http://www.w3.org/2000/svg">
  <!-- Body -->
  <path fill="none" stroke="black" strokeWidth="2" d="M30,120 L30,140 L170,140 L170,120 L140,90 L60,90 L30,120 Z" />
  <!-- Windows -->
  <path fill="none" stroke="black" strokeWidth="2" d="M60,90 L70,70 L130,70 L140,90" />
  <path fill="none" stroke="black" strokeWidth="2" d="M80,90 L85,70" />
  <path fill="none" stroke="black" strokeWidth="2" d="M120,90 L115,70" />
  <!-- Wheels -->
  <circle fill="none" stroke="black" strokeWidth="2" cx="60" cy="140" r="15" />
  <circle fill="none" stroke="black" strokeWidth="2" cx="140" cy="140" r="15" />
  <!-- Headlights -->
  <rect fill="none" stroke="black" strokeWidth="2" x="35" y="110" width="10" height="10" />
  <rect fill="none" stroke="black" strokeWidth="2" x="155" y="110" width="10" height="10" />
  <!-- Door -->
  <path fill="none" stroke="black" strokeWidth="2" d="M85,90 L85,130" />
  <circle fill="none" stroke="black" strokeWidth="2" cx="95" cy="110" r="3" />
</svg>"#;

const BUTTERFLY: &str = r#"<svg viewBox="0 0 200 200" xmlns="http://www.w3.org/2000/svg">
  <!-- Body -->
  <path fill="none" stroke="black" strokeWidth="2" d="M100,50 L100,150" />
  <!-- Antennae -->
  <path fill="none" stroke="black" strokeWidth="2" d="M100,50 L85,30" />
  <path fill="none" stroke="black" strokeWidth="2" d="M100,50 L115,30" />
  <!-- Wings -->
  <path fill="none" stroke="black" strokeWidth="2" d="M100,70 C60,40 40,70 50,100 C40,130 60,160 100,130" />
  <path fill="none" stroke="black" strokeWidth="2" d="M100,70 C140,40 160,70 150,100 C160,130 140,160 100,130" />
  <!-- Wing spots -->
  <circle fill="none" stroke="black" strokeWidth="2" cx="75" cy="85" r="10" />
  <circle fill="none" stroke="black" strokeWidth="2" cx="125" cy="85" r="10" />
  <circle fill="none" stroke="black" strokeWidth="2" cx="75" cy="115" r="8" />
  <circle fill="none" stroke="black" strokeWidth="2" cx="125" cy="115" r="8" />
</svg>"#;

const TREE: &str = r#"<svg viewBox="0 0 200 200" xmlns="http://www.w3.org/2000/svg">
  <!-- Trunk -->
  <rect fill="none" stroke="black" strokeWidth="2" x="85" y="120" width="30" height="60" />
  <!-- Foliage -->
  <ellipse fill="none" stroke="black" strokeWidth="2" cx="100" cy="50" rx="40" ry="30" />
  <ellipse fill="none" stroke="black" strokeWidth="2" cx="70" cy="80" rx="30" ry="25" />
  <ellipse fill="none" stroke="black" strokeWidth="2" cx="130" cy="80" rx="30" ry="25" />
  <ellipse fill="none" stroke="black" strokeWidth="2" cx="100" cy="100" rx="45" ry="30" />
</svg>"#;

/// `(id, spoken name, markup)` for each built-in outline, in display order.
const BUILTINS: [(&str, &str, &str); 5] = [
    ("sun", "Sol", SUN),
    ("house", "Casa", HOUSE),
    ("car", "Carro", CAR),
    ("butterfly", "Borboleta", BUTTERFLY),
    ("tree", "Árvore", TREE),
];

/// Build the five built-in outline documents.
pub fn builtin_outlines() -> Vec<OutlineDocument> {
    BUILTINS
        .iter()
        .map(|(id, name, markup)| {
            OutlineDocument::new(*id, *name, OutlineContent::Vector((*markup).to_string()))
        })
        .collect()
}
