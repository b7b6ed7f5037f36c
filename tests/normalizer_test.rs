//! Integration tests for text normalization.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use tonal::analysis::lemmatizer::DictionaryLemmatizer;
use tonal::analysis::*;
use tonal::error::Result;

fn lemmatizing_normalizer() -> Result<Normalizer> {
    let lemmatizer = DictionaryLemmatizer::from_lemmas([
        "product", "review", "movie", "city", "box", "goose", "great", "terrible",
    ])
    .with_exception("geese", &["goose"]);
    Normalizer::new(&LexicalResources::english_with_lemmatizer(Arc::new(
        lemmatizer,
    )))
}

#[test]
fn test_noise_only_inputs_normalize_to_empty() -> Result<()> {
    let normalizer = Normalizer::new(&LexicalResources::english_default())?;

    for text in [
        "",
        "https://example.com/path?q=1",
        "www.example.org",
        "@someone",
        "#hashtag",
        "@alice #tbt http://t.co/xyz www.a.b",
        "   \t\n ",
        "42 !!! 3.14",
    ] {
        assert_eq!(normalizer.normalize(text), "", "input: {text:?}");
    }

    Ok(())
}

#[test]
fn test_mention_removed_entirely() -> Result<()> {
    let normalizer = Normalizer::new(&LexicalResources::english_default())?;
    assert_eq!(
        normalizer.normalize("@alice hello"),
        normalizer.normalize("hello")
    );
    assert_eq!(normalizer.normalize("@alice_99 hello"), "hello");
    Ok(())
}

#[test]
fn test_mention_ends_where_training_text_did() -> Result<()> {
    let normalizer = Normalizer::new(&LexicalResources::english_default())?;
    // Superscript digits are word characters, combining marks are not
    assert_eq!(normalizer.normalize("@bob\u{b2}great fun"), "fun");
    assert_eq!(normalizer.normalize("@jose\u{301}great fun"), "great fun");
    Ok(())
}

#[test]
fn test_information_separators_split_words() -> Result<()> {
    let normalizer = Normalizer::new(&LexicalResources::english_default())?;
    assert_eq!(normalizer.normalize("good\u{1c}product"), "good product");
    assert_eq!(normalizer.normalize("http\u{1f}xyz great"), "http xyz great");
    Ok(())
}

#[test]
fn test_normalization_is_idempotent() -> Result<()> {
    let normalizer = lemmatizing_normalizer()?;

    for text in [
        "The movies were GREAT, and the boxes arrived early!",
        "Terrible reviews from @critic about the cities #fail",
        "geese everywhere http://birds.example",
    ] {
        let once = normalizer.normalize(text);
        assert_eq!(normalizer.normalize(&once), once, "input: {text:?}");
    }

    Ok(())
}

#[test]
fn test_full_pipeline_with_lemmas() -> Result<()> {
    let normalizer = lemmatizing_normalizer()?;
    assert_eq!(
        normalizer.normalize("The movies were GREAT, and the boxes arrived early!"),
        "movie great box arrived early"
    );
    assert_eq!(normalizer.normalize("so many geese"), "many goose");
    assert_eq!(normalizer.normalize("Cities!!!"), "city");
    Ok(())
}

#[test]
fn test_resources_from_directory() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join(resources::STOPWORDS_FILE),
        "# custom list\nthe\nproduct\n",
    )?;
    fs::write(dir.path().join(resources::LEMMAS_FILE), "review\nbox\n")?;
    fs::write(
        dir.path().join(resources::LEMMA_EXCEPTIONS_FILE),
        "oxen ox\n",
    )?;

    let resources = LexicalResources::load_dir(Some(dir.path()))?;
    assert_eq!(resources.stopwords().len(), 2);
    assert!(resources.is_stopword("product"));
    assert_eq!(resources.lemmatizer().name(), "dictionary");

    let normalizer = Normalizer::new(&resources)?;
    // "and" is no longer a stopword; "product" now is
    assert_eq!(
        normalizer.normalize("the product and the reviews and boxes"),
        "and review and box"
    );

    Ok(())
}

#[test]
fn test_missing_lemma_file_disables_lemmatization() -> Result<()> {
    let dir = TempDir::new()?;
    let resources = LexicalResources::load_dir(Some(dir.path()))?;
    assert_eq!(resources.lemmatizer().name(), "identity");

    let normalizer = Normalizer::new(&resources)?;
    assert_eq!(normalizer.normalize("loved the movies"), "loved movies");
    Ok(())
}

#[test]
fn test_malformed_exception_file() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join(resources::LEMMAS_FILE), "box\n")?;
    fs::write(
        dir.path().join(resources::LEMMA_EXCEPTIONS_FILE),
        "oxen ox\ngeese\n",
    )?;

    let err = LexicalResources::load_dir(Some(dir.path())).unwrap_err();
    assert!(err.to_string().contains("line 2"));
    Ok(())
}

#[test]
fn test_normalizer_shared_across_threads() -> Result<()> {
    let normalizer = Arc::new(lemmatizing_normalizer()?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let normalizer = Arc::clone(&normalizer);
            std::thread::spawn(move || normalizer.normalize("Great movies, terrible boxes"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "great movie terrible box");
    }

    Ok(())
}
