//! End-to-end behavior of the extractive summarizer.

use pretty_assertions::assert_eq;
use rapid_summarizer::pipeline::observer::{StageTimingObserver, STAGE_SEGMENT};
use rapid_summarizer::pipeline::runner::TextRankPipeline;
use rapid_summarizer::{
    summarize, summarize_with_config, ErrorCode, SimilarityMeasure, Summarizer, SummaryError,
    SummaryMethod, SummaryRequest, TextRankConfig,
};

const MAMMALS: &str =
    "Cats are mammals. Dogs are mammals too. The sky is blue. Mammals have fur.";

const ARTICLE: &str = "The river flooded the old town after three days of rain. \
    Residents of the town moved to higher ground as the river kept rising. \
    A local bakery stayed open and handed out bread. \
    Engineers say the river defences in the town were never finished. \
    The mayor promised new defences for the river before next winter. \
    Football fixtures for the weekend were postponed.";

fn extract(text: &str, k: usize, cfg: &TextRankConfig) -> rapid_summarizer::SummaryResult {
    TextRankPipeline::textrank()
        .run(text, k, cfg, &mut rapid_summarizer::pipeline::observer::NoopObserver)
        .unwrap()
}

#[test]
fn off_topic_sentence_is_left_out() {
    let result = extract(MAMMALS, 2, &TextRankConfig::default());

    assert_eq!(result.len(), 2);
    assert!(!result.indices().contains(&2), "picked {:?}", result.indices());
    assert!(!result.text.contains("sky"));
}

#[test]
fn central_sentences_win_in_a_longer_text() {
    let result = extract(ARTICLE, 3, &TextRankConfig::default());

    assert_eq!(result.total_sentences, 6);
    assert_eq!(result.len(), 3);
    let picked = result.indices();
    assert!(!picked.contains(&5), "picked {:?}", picked);
    assert!(!picked.contains(&2), "picked {:?}", picked);
}

#[test]
fn single_sentence_comes_back_unchanged() {
    let text = "Only one sentence lives here.";
    assert_eq!(summarize(text, 5).unwrap(), text);
}

#[test]
fn text_without_punctuation_is_one_sentence() {
    let text = "no punctuation anywhere in this line";
    let result = extract(text, 2, &TextRankConfig::default());
    assert_eq!(result.total_sentences, 1);
    assert_eq!(result.text, text);
}

#[test]
fn k_larger_than_document_returns_everything_in_order() {
    let result = extract(MAMMALS, 10, &TextRankConfig::default());
    assert_eq!(result.indices(), vec![0, 1, 2, 3]);
    assert_eq!(result.text, MAMMALS);
}

#[test]
fn empty_and_blank_input_are_rejected() {
    for text in ["", "   ", "\n\t \n"] {
        let err = summarize(text, 3).unwrap_err();
        assert!(matches!(err, SummaryError::EmptyInput), "{text:?}: {err}");
        assert_eq!(err.code(), ErrorCode::EmptyInput);
    }
}

#[test]
fn zero_sentences_requested_is_rejected() {
    let err = summarize(MAMMALS, 0).unwrap_err();
    assert!(matches!(err, SummaryError::InvalidParameter { .. }));
}

#[test]
fn repeated_runs_are_identical() {
    let cfg = TextRankConfig::default();
    let first = extract(ARTICLE, 3, &cfg);
    let second = extract(ARTICLE, 3, &cfg);

    assert_eq!(first.text, second.text);
    let scores = |r: &rapid_summarizer::SummaryResult| {
        r.sentences.iter().map(|s| s.score).collect::<Vec<_>>()
    };
    assert_eq!(scores(&first), scores(&second));
}

#[test]
fn parallel_and_sequential_graphs_agree() {
    let sequential = TextRankConfig {
        parallel_threshold: usize::MAX,
        ..TextRankConfig::default()
    };
    let parallel = TextRankConfig {
        parallel_threshold: 0,
        ..TextRankConfig::default()
    };

    assert_eq!(
        extract(ARTICLE, 3, &sequential).text,
        extract(ARTICLE, 3, &parallel).text
    );
}

#[test]
fn abbreviations_do_not_split_sentences() {
    let text = "Dr. Smith met Mr. Jones at noon. They talked about J. R. Tolkien for hours.";
    let mut obs = StageTimingObserver::new();
    TextRankPipeline::textrank()
        .run(text, 1, &TextRankConfig::default(), &mut obs)
        .unwrap();
    assert_eq!(obs.report(STAGE_SEGMENT).unwrap().sentences(), Some(2));
}

#[test]
fn cosine_measure_also_drops_the_outlier() {
    let cfg = TextRankConfig {
        similarity: SimilarityMeasure::Cosine,
        ..TextRankConfig::default()
    };
    let summary = summarize_with_config(MAMMALS, 2, &cfg).unwrap();
    assert!(!summary.contains("sky"));
}

#[test]
fn ordinary_words_before_a_period_end_sentences() {
    let text = "She said no. Then she left the room. We sat in the sun. \
        It was warm outside. He takes vitamin C. It keeps him healthy. \
        They chose option A. The others disagreed.";
    let result = extract(text, 20, &TextRankConfig::default());
    assert_eq!(result.total_sentences, 8);
}

#[test]
fn missing_abbreviation_file_fails_even_after_a_default_run() {
    summarize("Warm up. Go.", 1).unwrap();

    let cfg = TextRankConfig {
        abbreviations_path: Some("/definitely/missing/abbrev.txt".into()),
        ..TextRankConfig::default()
    };
    let err = summarize_with_config(MAMMALS, 1, &cfg).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ResourceUnavailable);
}

#[test]
fn config_from_json_drives_the_service() {
    let cfg = TextRankConfig::from_json_str(r#"{ "similarity": "cosine", "damping": 0.8 }"#).unwrap();
    let service = Summarizer::new(cfg).unwrap();
    assert_eq!(service.config().similarity, SimilarityMeasure::Cosine);

    let response = service
        .summarize(&SummaryRequest::new(MAMMALS, SummaryMethod::extractive(1)))
        .unwrap();
    assert_eq!(response.extractive.unwrap().len(), 1);
}

#[test]
fn strict_config_rejects_unknown_fields() {
    let cfg = TextRankConfig::from_json_str(r#"{ "strict": true, "dampng": 0.9 }"#).unwrap();
    let err = Summarizer::new(cfg).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidConfig);
    assert!(err.to_string().contains("dampng"));
}

#[test]
fn response_serializes_with_method_tag() {
    let service = Summarizer::new(TextRankConfig::default()).unwrap();
    let response = service
        .summarize(&SummaryRequest::new(MAMMALS, SummaryMethod::extractive(2)))
        .unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["method"], "extractive");
    assert_eq!(json["num_sentences"], 2);
    assert_eq!(json["extractive"]["total_sentences"], 4);
    assert_eq!(json["summary"], response.summary.as_str());
}
