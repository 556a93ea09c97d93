use unicode_normalization::UnicodeNormalization;

/// 轉小寫、去除 IAST 變音符號、移除標點並壓縮空白
///
/// `"Pūrva Phālgunī"` -> `"purva phalguni"`, `"Aśvinī"` -> `"asvini"`
pub fn normalize_name(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());

    for ch in input.chars().flat_map(char::to_lowercase) {
        if let Some(replacement) = fold_char(ch) {
            folded.push_str(replacement);
        } else if ch.is_ascii_alphanumeric() {
            folded.push(ch);
        } else if ch.is_whitespace() {
            folded.push(' ');
        } else {
            // 表外字元：分解後只留 ASCII 字母數字，其餘（組合符號、標點）丟棄
            folded.extend(ch.nfd().filter(|c| c.is_ascii_alphanumeric()));
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_char(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'ā' | 'á' | 'à' | 'ä' | 'â' => "a",
        'ī' | 'í' | 'ì' | 'ï' | 'î' => "i",
        'ū' | 'ú' | 'ù' | 'ü' | 'û' => "u",
        'ē' | 'é' | 'è' | 'ë' | 'ê' => "e",
        'ō' | 'ó' | 'ò' | 'ö' | 'ô' => "o",
        'ṛ' | 'ṝ' => "r",
        'ḷ' | 'ḹ' => "l",
        'ṃ' | 'ṁ' => "m",
        'ḥ' => "h",
        'ś' | 'ṣ' => "s",
        'ṭ' => "t",
        'ḍ' => "d",
        'ṇ' | 'ṅ' | 'ñ' => "n",
        'ç' => "c",
        'ß' => "ss",
        _ => return None,
    };
    Some(folded)
}

/// 以空白切分，只保留長度大於 2 的詞
pub fn significant_tokens(normalized: &str) -> Vec<String> {
    normalized
        .split(' ')
        .filter(|token| token.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_iast_diacritics() {
        assert_eq!(normalize_name("Aśvinī"), "asvini");
        assert_eq!(normalize_name("Aśvini"), "asvini");
        assert_eq!(normalize_name("Kṛttikā"), "krttika");
        assert_eq!(normalize_name("Jyeṣṭhā"), "jyestha");
        assert_eq!(normalize_name("Pūrvāṣāḍhā"), "purvasadha");
        assert_eq!(normalize_name("Kiṃstughna"), "kimstughna");
        assert_eq!(normalize_name("Śravaṇa"), "sravana");
    }

    #[test]
    fn test_uppercase_diacritics_are_lowercased_first() {
        assert_eq!(normalize_name("ĀRDRĀ"), "ardra");
        assert_eq!(normalize_name("Śatabhiṣā"), "satabhisa");
    }

    #[test]
    fn test_latin_accents_and_special_letters() {
        assert_eq!(normalize_name("Miércoles"), "miercoles");
        assert_eq!(normalize_name("Señal"), "senal");
        assert_eq!(normalize_name("Façade"), "facade");
        assert_eq!(normalize_name("Straße"), "strasse");
    }

    #[test]
    fn test_decomposition_fallback_for_unlisted_marks() {
        // 不在對照表中的字元靠 NFD 去除
        assert_eq!(normalize_name("Ǎ"), "a");
        assert_eq!(normalize_name("ẓẏ"), "zy");
        assert_eq!(normalize_name("Maṅgalavāra"), "mangalavara");
    }

    #[test]
    fn test_collapses_whitespace_and_drops_punctuation() {
        assert_eq!(normalize_name("  Pūrva   Phālgunī "), "purva phalguni");
        assert_eq!(normalize_name("Purva-Phalguni"), "purvaphalguni");
        assert_eq!(normalize_name("Uttara\tĀṣāḍhā"), "uttara asadha");
        assert_eq!(normalize_name("(Ravi)"), "ravi");
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name("—?!"), "");
    }

    #[test]
    fn test_significant_tokens_skip_short_words() {
        assert_eq!(
            significant_tokens("amrita siddhi yoga"),
            vec!["amrita", "siddhi", "yoga"]
        );
        assert_eq!(significant_tokens("el de ravi"), vec!["ravi"]);
        assert!(significant_tokens("ab").is_empty());
        assert!(significant_tokens("").is_empty());
    }
}
