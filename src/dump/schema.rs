//! PostgreSQL schema for the dictionary dump

/// Drops and recreates the four dictionary tables.
///
/// Child tables are dropped before `headwords` and created after it.
pub const SCHEMA_SQL: &str = r#"
DROP TABLE IF EXISTS examples;
DROP TABLE IF EXISTS phrases;
DROP TABLE IF EXISTS definitions;
DROP TABLE IF EXISTS headwords;

-- Headwords: one row per input record
CREATE TABLE headwords (
    id INTEGER PRIMARY KEY,
    word VARCHAR(255) UNIQUE NOT NULL,
    british_phonetics VARCHAR(255),
    american_phonetics VARCHAR(255),
    etymology JSONB,
    difficulty_analysis JSONB,
    semantic_relations JSONB,
    cultural_context JSONB,
    memory_aids JSONB,
    grammatical_info JSONB,
    metadata JSONB
);

-- Definitions: senses of a headword
CREATE TABLE definitions (
    id SERIAL PRIMARY KEY,
    headword_id INTEGER REFERENCES headwords(id) ON DELETE CASCADE,
    part_of_speech VARCHAR(255),
    definition TEXT,
    chinese_translation TEXT,
    level VARCHAR(255),
    frequency VARCHAR(255),
    register VARCHAR(255)
);

-- Phrases: common collocations and idioms
CREATE TABLE phrases (
    id SERIAL PRIMARY KEY,
    headword_id INTEGER REFERENCES headwords(id) ON DELETE CASCADE,
    phrase TEXT,
    meaning TEXT,
    example TEXT,
    example_translation TEXT,
    frequency VARCHAR(255)
);

-- Examples: usage sentences
CREATE TABLE examples (
    id SERIAL PRIMARY KEY,
    headword_id INTEGER REFERENCES headwords(id) ON DELETE CASCADE,
    sentence TEXT,
    translation TEXT,
    source VARCHAR(255),
    difficulty VARCHAR(255)
);

CREATE INDEX idx_definitions_headword ON definitions(headword_id);
CREATE INDEX idx_phrases_headword ON phrases(headword_id);
CREATE INDEX idx_examples_headword ON examples(headword_id);

"#;

/// Comment block opening every dump file
pub fn part_header(index: usize) -> String {
    format!("--\n-- PostgreSQL database dump (Part {index})\n--\n\n")
}
