//! Модуль структур BBAN.
//!
//! BBAN каждой страны описывается последовательностью полей фиксированной
//! длины с заданным алфавитом.

pub mod registry;
pub mod structure;

pub use registry::{iban_length, is_supported, structure_for, supported_countries};
pub use structure::{BbanCharacterType, BbanEntryType, BbanStructure, BbanStructureEntry};
