//! Common regex patterns for identity document extraction.
//!
//! Patterns run against normalized text, so a single space is the only
//! whitespace they ever see between tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Driving license name: letters and spaces after "Name", up to the
    // relationship marker (S/O, D/O, W/O) or end of text.
    pub static ref DL_NAME: Regex = Regex::new(
        r"(?i)Name\s*©?\s*([A-Za-z][A-Za-z\s]+?)\s*(?:S/|D/|W/|$)"
    ).unwrap();

    // Driving license number, up to the DOI label or end of text.
    pub static ref DL_NUMBER: Regex = Regex::new(
        r"(?i)(?:DL\s+NO|License\s+No)\s*©?\s*'?([^:]+?)(?:\s+DOI|\s*$)"
    ).unwrap();

    // Driving license expiry (DD-MM-YYYY, stray space before the last hyphen)
    pub static ref DL_EXPIRY: Regex = Regex::new(
        r"(?i)(?:Valid upto|Valid Till|Validity|Expiry)\s*:?\s*([0-9]{2}-[0-9]{2}\s*-[0-9]{4})"
    ).unwrap();

    pub static ref DL_DATE_OF_BIRTH: Regex = Regex::new(
        r"(?i)(?:DOB|Date of Birth)\s*:?\s*([0-9]{2}-[0-9]{2}-[0-9]{4})"
    ).unwrap();

    // Passport number: one letter followed by 7-8 digits
    pub static ref PASSPORT_NUMBER: Regex = Regex::new(
        r"(?i)[A-Z][0-9]{7,8}"
    ).unwrap();

    // Passport dates (DD/MM/YYYY)
    pub static ref PASSPORT_DATE: Regex = Regex::new(
        r"[0-9]{2}/[0-9]{2}/[0-9]{4}"
    ).unwrap();

    // MRZ name line: P<, issuing country, surname, <<, given names.
    // Single '<' fillers separate parts of multi-word names.
    pub static ref MRZ_NAME: Regex = Regex::new(
        r"P<([A-Z]{3})([A-Z]+(?:<[A-Z]+)*)<<([A-Z]+(?:<[A-Z]+)*)"
    ).unwrap();

    // All-caps word (two or more letters)
    pub static ref CAPS_WORD: Regex = Regex::new(
        r"[A-Z]{2,}"
    ).unwrap();
}
