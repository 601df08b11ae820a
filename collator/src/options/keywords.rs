// ключевые слова сопоставления из расширения "u" языковых тегов BCP 47, UTS #35:
// https://www.unicode.org/reports/tr35/tr35-collation.html#Setting_Options
//
// строка вида "ks-level2-kn-true-kr-grek-latn": пары ключ-значение через дефис

use super::{AlternateHandling, CaseFirst, Settings, Strength};
use crate::error::ConfigError;
use crate::table::Group;

/// разобрать ключевые слова и применить их к настройкам; при ошибке настройки не меняются
pub fn apply_keywords(settings: &mut Settings, keywords: &str) -> Result<(), ConfigError>
{
    let mut result = settings.clone();
    let mut parts = keywords.split(['-', '_']).filter(|part| !part.is_empty()).peekable();

    while let Some(key) = parts.next() {
        let key = key.to_ascii_lowercase();

        // значение kr - несколько кодов письменностей подряд
        if key == "kr" {
            let mut codes = vec![];

            while let Some(value) = parts.next_if(|value| !is_key(value)) {
                codes.push(Group::from_code(value)?);
            }

            result.reorder_codes = codes;
            continue;
        }

        let value = parts
            .next()
            .map(|value| value.to_ascii_lowercase())
            .ok_or_else(|| invalid(&key, ""))?;

        match key.as_str() {
            "ks" => {
                result.strength = match value.as_str() {
                    "level1" => Strength::Primary,
                    "level2" => Strength::Secondary,
                    "level3" => Strength::Tertiary,
                    "level4" | "quarternary" => Strength::Quaternary,
                    "identic" => Strength::Identical,
                    _ => return Err(invalid(&key, &value)),
                }
            }
            "ka" => {
                result.alternate = match value.as_str() {
                    "noignore" => AlternateHandling::NonIgnorable,
                    "shifted" => AlternateHandling::Shifted,
                    _ => return Err(invalid(&key, &value)),
                }
            }
            "kb" => result.french = boolean(&key, &value)?,
            "kc" => result.case_level = boolean(&key, &value)?,
            "kn" => result.numeric = boolean(&key, &value)?,
            "kh" => result.hiragana_quaternary = boolean(&key, &value)?,
            "kf" => {
                result.case_first = match value.as_str() {
                    "upper" => CaseFirst::Upper,
                    "lower" => CaseFirst::Lower,
                    "false" => CaseFirst::Off,
                    _ => return Err(invalid(&key, &value)),
                }
            }
            "kv" => {
                let group = Group::from_code(&value).map_err(|_| invalid(&key, &value))?;

                if !group.is_variable() {
                    return Err(ConfigError::InvalidMaxVariable(group));
                }

                result.max_variable = group;
            }
            _ => return Err(ConfigError::UnknownKeyword(key)),
        }
    }

    *settings = result;

    Ok(())
}

/// ключи - ровно две латинские буквы, первая из них - "k"
fn is_key(part: &str) -> bool
{
    part.len() == 2 && part.as_bytes()[0].eq_ignore_ascii_case(&b'k') && part.as_bytes()[1].is_ascii_alphabetic()
}

fn boolean(key: &str, value: &str) -> Result<bool, ConfigError>
{
    match value {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError
{
    ConfigError::InvalidKeywordValue {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}
