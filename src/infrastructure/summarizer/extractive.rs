use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::domain::study::Summarizer;

pub const EMPTY_TEXT_MESSAGE: &str = "Texto fornecido está vazio ou nulo.";

lazy_static! {
  static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
  static ref NON_WORD: Regex = Regex::new(r"\W+").expect("valid regex");
  static ref STOPWORDS: HashSet<&'static str> = [
    "a", "o", "de", "e", "do", "da", "em", "um", "uma", "para", "que", "se", "com", "os", "as",
    "no", "na", "por", "uns", "umas", "ao", "aos", "à", "às", "pelo", "pela", "pelos", "pelas",
    "num", "numa", "nuns", "numas", "dum", "duma", "duns", "dumas", "este", "esta", "estes",
    "estas", "esse", "essa", "esses", "essas", "aquele", "aquela", "aqueles", "aquelas", "isto",
    "isso", "aquilo", "outro", "outra", "outros", "outras", "tal", "tais", "qual", "quais",
    "cujo", "cuja", "cujos", "cujas", "quanto", "quanta", "quantos", "quantas", "qualquer",
    "quaisquer", "algum", "alguma", "alguns", "algumas", "nenhum", "nenhuma", "nenhuns",
    "nenhumas", "todo", "toda", "todos", "todas", "cada", "vários", "várias", "outrem", "tudo",
    "nada", "algo", "alguém", "ninguém", "quem", "sem", "sob", "sobre", "tras", "ante", "apos",
    "ate", "perante", "quando", "enquanto", "antes", "depois", "desde", "onde", "aonde", "como",
    "porque", "pois", "embora", "mesmo", "talvez", "sempre", "nunca", "jamais", "agora", "logo",
    "aqui", "ali", "la",
  ]
  .into_iter()
  .collect();
}

const OPENING_SENTENCES: usize = 3;
const OPENING_SHARE: f64 = 0.3;
const BODY_SHARE: f64 = 0.8;

/// Frequency based extractive summarizer.
///
/// Picks a few opening sentences, then the best scored sentences of the
/// body, then the closing ones, and returns them in their original order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
  pub fn new() -> Self {
    Self
  }
}

impl Summarizer for ExtractiveSummarizer {
  fn summarize(&self, text: &str, max_words: usize) -> String {
    let cleaned = WHITESPACE.replace_all(text, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
      return EMPTY_TEXT_MESSAGE.to_string();
    }

    let sentences: Vec<&str> = split_sentences(cleaned)
      .into_iter()
      .map(str::trim)
      .filter(|s| word_count(s) > 3 && s.chars().count() > 10)
      .collect();

    if sentences.is_empty() {
      return basic_summary(cleaned, max_words);
    }

    let selected = select_sentences(&sentences, max_words);
    if selected.is_empty() {
      return basic_summary(cleaned, max_words);
    }

    let mut summary = sentences
      .iter()
      .enumerate()
      .filter(|(i, _)| selected.contains(i))
      .map(|(_, s)| *s)
      .collect::<Vec<_>>()
      .join(" ");

    if !summary.ends_with('.') {
      summary.push('.');
    }
    summary
  }
}

/// Splits after `.`, `!` or `?` when followed by whitespace
fn split_sentences(text: &str) -> Vec<&str> {
  let mut sentences = Vec::new();
  let mut start = 0;
  let mut prev: Option<char> = None;

  for (i, c) in text.char_indices() {
    if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
      sentences.push(&text[start..i]);
      start = i + c.len_utf8();
    }
    prev = Some(c);
  }

  if start < text.len() {
    sentences.push(&text[start..]);
  }
  sentences
}

fn word_count(sentence: &str) -> usize {
  sentence.split_whitespace().count()
}

fn significant_words(sentence: &str) -> impl Iterator<Item = String> + '_ {
  NON_WORD
    .split(sentence)
    .map(str::to_lowercase)
    .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(w.as_str()))
}

fn word_frequencies(sentences: &[&str]) -> HashMap<String, usize> {
  let mut frequencies = HashMap::new();
  for sentence in sentences {
    for word in significant_words(sentence) {
      *frequencies.entry(word).or_insert(0) += 1;
    }
  }
  frequencies
}

/// Score of every distinct sentence, keyed by the index of its first occurrence
fn score_sentences(sentences: &[&str]) -> Vec<(usize, f64)> {
  let frequencies = word_frequencies(sentences);
  let total = sentences.len() as f64;
  let head = (total * 0.1).min(5.0);
  let tail = total - (total * 0.1).min(3.0);

  let mut scores: Vec<(usize, f64)> = Vec::new();
  let mut first_index: HashMap<&str, usize> = HashMap::new();

  for (i, sentence) in sentences.iter().enumerate() {
    let words = word_count(sentence);
    let mut score: f64 = significant_words(sentence)
      .map(|w| frequencies.get(&w).copied().unwrap_or(0) as f64)
      .sum();

    let position = i as f64;
    if position < head {
      score *= 1.5;
    }
    if position >= tail {
      score *= 1.2;
    }
    if (8..=25).contains(&words) {
      score *= 1.1;
    }
    score /= words as f64;

    // A repeated sentence keeps its first position and its latest score
    match first_index.get(sentence) {
      Some(&first) => {
        if let Some(entry) = scores.iter_mut().find(|(idx, _)| *idx == first) {
          entry.1 = score;
        }
      }
      None => {
        first_index.insert(*sentence, i);
        scores.push((i, score));
      }
    }
  }

  scores
}

/// Best score first; `sort_by` is stable so ties keep the original order
fn rank_sentences(sentences: &[&str]) -> Vec<(usize, f64)> {
  let mut ranked = score_sentences(sentences);
  ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
  ranked
}

fn select_sentences(sentences: &[&str], max_words: usize) -> HashSet<usize> {
  let total = sentences.len();
  let budget = max_words as f64;
  let mut selected: HashSet<usize> = HashSet::new();
  let mut chosen_text: HashSet<&str> = HashSet::new();
  let mut used = 0usize;

  for (i, sentence) in sentences.iter().enumerate().take(OPENING_SENTENCES.min(total)) {
    if chosen_text.contains(sentence) {
      continue;
    }
    let words = word_count(sentence);
    if (used + words) as f64 > budget * OPENING_SHARE {
      break;
    }
    selected.insert(i);
    chosen_text.insert(*sentence);
    used += words;
  }

  for (i, _) in rank_sentences(sentences) {
    let sentence = sentences[i];
    if chosen_text.contains(sentence) || i < OPENING_SENTENCES || i + 2 >= total {
      continue;
    }
    let words = word_count(sentence);
    if (used + words) as f64 <= budget * BODY_SHARE {
      selected.insert(i);
      chosen_text.insert(sentence);
      used += words;
    }
  }

  let closing = (total / 10).min(2);
  for (i, sentence) in sentences.iter().enumerate().skip(total - closing) {
    if chosen_text.contains(sentence) {
      continue;
    }
    let words = word_count(sentence);
    if used + words > max_words {
      break;
    }
    selected.insert(i);
    chosen_text.insert(*sentence);
    used += words;
  }

  selected
}

/// Used when no sentence qualifies: the text itself, cut to `max_words`
fn basic_summary(text: &str, max_words: usize) -> String {
  let words: Vec<&str> = text.split_whitespace().collect();
  if words.len() <= max_words {
    let mut summary = text.to_string();
    if !summary.ends_with('.') {
      summary.push('.');
    }
    return summary;
  }

  format!("{}...", words[..max_words].join(" "))
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEXT: &str = "Introdução geral sobre biologia celular. \
    Primeiro capítulo trata das células. \
    Segundo capítulo trata das membranas. \
    Célula animal possui núcleo definido. \
    Xilofone azul dança sapateado ontem. \
    Célula vegetal possui parede celular. \
    Célula procarionte possui núcleo ausente. \
    Célula eucarionte possui núcleo organizado. \
    Penúltima frase apenas completa texto. \
    Conclusão final sobre célula estudada.";

  /// Twenty sentences of distinct words, so each raw score equals the word
  /// count and only the position and length multipliers remain
  fn distinct_sentences() -> Vec<String> {
    (0..20)
      .map(|i| {
        let words = if i == 1 || i == 10 { 8 } else { 4 };
        (0..words)
          .map(|j| format!("termo{i}n{j}"))
          .collect::<Vec<_>>()
          .join(" ")
      })
      .collect()
  }

  #[test]
  fn test_score_multipliers() {
    let owned = distinct_sentences();
    let sentences: Vec<&str> = owned.iter().map(String::as_str).collect();

    let scores: HashMap<usize, f64> = score_sentences(&sentences).into_iter().collect();
    let expected = |i: usize| match i {
      0 => 1.5,
      1 => 1.5 * 1.1,
      10 => 1.1,
      18 | 19 => 1.2,
      _ => 1.0,
    };

    assert_eq!(scores.len(), 20);
    for i in 0..20 {
      assert!(
        (scores[&i] - expected(i)).abs() < 1e-9,
        "sentence {i}: {} != {}",
        scores[&i],
        expected(i)
      );
    }
  }

  #[test]
  fn test_ranking_breaks_ties_by_position() {
    let owned = distinct_sentences();
    let sentences: Vec<&str> = owned.iter().map(String::as_str).collect();

    let order: Vec<usize> = rank_sentences(&sentences).into_iter().map(|(i, _)| i).collect();

    let mut expected = vec![1, 0, 18, 19, 10];
    expected.extend((2..18).filter(|i| *i != 10));
    assert_eq!(order, expected);
  }

  #[test]
  fn test_blank_text() {
    assert_eq!(ExtractiveSummarizer.summarize(" \n\t", 100), EMPTY_TEXT_MESSAGE);
  }

  #[test]
  fn test_split_sentences() {
    let parts = split_sentences("Um. Dois!  Três? Quatro v1.2 fim");
    assert_eq!(parts, vec!["Um.", "Dois!", " Três?", "Quatro v1.2 fim"]);
  }

  #[test]
  fn test_short_text_falls_back_to_basic_summary() {
    assert_eq!(ExtractiveSummarizer.summarize("Olá   mundo", 100), "Olá mundo.");
    assert_eq!(
      ExtractiveSummarizer.summarize("um dois três. quatro cinco seis.", 2),
      "um dois..."
    );
  }

  #[test]
  fn test_nothing_fits_budget_falls_back() {
    let text = "Primeira frase com seis palavras aqui. Segunda frase com seis palavras aqui.";
    assert_eq!(
      ExtractiveSummarizer.summarize(text, 3),
      "Primeira frase com..."
    );
  }

  #[test]
  fn test_short_document_keeps_opening() {
    let text = "Primeira frase tem seis palavras certas. \
      Segunda frase tem seis palavras certas. \
      Terceira frase tem seis palavras certas. \
      Quarta frase tem seis palavras certas.";

    let summary = ExtractiveSummarizer.summarize(text, 300);
    assert_eq!(
      summary,
      "Primeira frase tem seis palavras certas. \
       Segunda frase tem seis palavras certas. \
       Terceira frase tem seis palavras certas."
    );
  }

  #[test]
  fn test_prefers_frequent_terms_and_keeps_order() {
    let summary = ExtractiveSummarizer.summarize(TEXT, 40);

    assert!(summary.starts_with("Introdução geral sobre biologia celular. Primeiro capítulo"));
    assert!(!summary.contains("Segundo capítulo"));
    assert!(!summary.contains("Xilofone"));
    assert!(!summary.contains("Penúltima"));
    assert!(summary.ends_with("Conclusão final sobre célula estudada."));

    let animal = summary.find("animal").unwrap();
    let vegetal = summary.find("vegetal").unwrap();
    let eucarionte = summary.find("eucarionte").unwrap();
    assert!(animal < vegetal && vegetal < eucarionte);
  }

  #[test]
  fn test_respects_word_budget() {
    let summary = ExtractiveSummarizer.summarize(TEXT, 40);
    assert!(summary.split_whitespace().count() <= 40);
  }

  #[test]
  fn test_repeated_sentence_selected_once() {
    let text = "Frase inicial sobre tema principal. Frase inicial sobre tema principal. \
      Frase inicial sobre tema principal.";
    let summary = ExtractiveSummarizer.summarize(text, 300);
    assert_eq!(summary, "Frase inicial sobre tema principal.");
  }
}
