use serde::Serialize;

use crate::model::order::OrderItem;

/// A spoken-Chinese fragment with its pronunciation aids.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Phrase {
    pub zh: String,
    pub pinyin: String,
    pub kana: String,
}

/// What the host speech synthesizer is asked to say. Playback itself
/// (including cancelling a previous utterance) is the host's job.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: &'static str,
    pub rate: f32,
}

const SPEECH_LANG: &str = "zh-TW";
const SPEECH_RATE: f32 = 0.80;

// "I would like ..." lead of every ordering phrase.
const WO_YAO: (&str, &str, &str) = ("我要", "Wǒ yào", "ウォ ヤオ");

// Measure-word quantities 1..=10.
const COUNT_PHRASES: [(&str, &str, &str); 10] = [
    ("一份", "yí fèn", "イーフェン"),
    ("兩份", "liǎng fèn", "リィァンフェン"),
    ("三份", "sān fèn", "サンフェン"),
    ("四份", "sì fèn", "スーフェン"),
    ("五份", "wǔ fèn", "ウーフェン"),
    ("六份", "liù fèn", "リゥフェン"),
    ("七份", "qī fèn", "チーフェン"),
    ("八份", "bā fèn", "バーフェン"),
    ("九份", "jiǔ fèn", "ジョウフェン"),
    ("十份", "shí fèn", "シーフェン"),
];

/// Quantity phrase: the table entry for 1..=10, else the plain "N份"
/// form with no pronunciation aids.
pub fn count_phrase(count: u32) -> Phrase {
    match count {
        1..=10 => {
            let (zh, pinyin, kana) = COUNT_PHRASES[(count - 1) as usize];
            Phrase {
                zh: zh.to_string(),
                pinyin: pinyin.to_string(),
                kana: kana.to_string(),
            }
        }
        _ => Phrase {
            zh: format!("{count}份"),
            pinyin: String::new(),
            kana: String::new(),
        },
    }
}

/// The full ordering phrase for one item: 我要 + quantity + dish name.
/// Pinyin and kana join the same fragments with spaces, skipping empties.
pub fn order_phrase(item: &OrderItem) -> Phrase {
    let count = count_phrase(item.count);

    let zh = format!("{}{}{}", WO_YAO.0, count.zh, item.dish_name_zh);
    let pinyin = join_fragments(&[WO_YAO.1, &count.pinyin, &item.pinyin]);
    let kana = join_fragments(&[WO_YAO.2, &count.kana, &item.kana]);

    Phrase { zh, pinyin, kana }
}

/// The gloss shown next to the phrase: 「◯◯を N 人前ください」.
pub fn japanese_gloss(item: &OrderItem) -> String {
    format!("{}を{}人前ください", item.dish_name_ja, item.count)
}

/// One utterance covering every selected item, separated by full stops.
pub fn speak_all(items: &[OrderItem]) -> Option<Utterance> {
    let joined = items
        .iter()
        .filter(|i| i.count > 0)
        .map(|i| order_phrase(i).zh)
        .collect::<Vec<String>>()
        .join("。");

    if joined.is_empty() {
        None
    } else {
        Some(utterance(joined))
    }
}

pub fn utterance(text: impl Into<String>) -> Utterance {
    Utterance {
        text: text.into(),
        lang: SPEECH_LANG,
        rate: SPEECH_RATE,
    }
}

fn join_fragments(fragments: &[&str]) -> String {
    fragments
        .iter()
        .filter(|f| !f.is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join(" ")
}
