// поиск сокращений: сначала непрерывное совпадение, затем разрывное (UCA S2.1.1 - S2.1.3)

use crate::codepoint::{ccc, decomposition};
use crate::collation_element::TableValue;

use super::Elements;

impl Elements<'_>
{
    /// найти самое длинное сокращение, начинающееся с прочитанного стартера (корень node);
    /// непоглощенные кодпоинты возвращаются в итератор
    pub(super) fn match_contraction(&mut self, root: u32) -> TableValue
    {
        let table = self.table;
        let contractions = table.contractions();

        self.work.matched.clear();
        self.work.skipped.clear();

        let mut node = root;
        let mut best_node = root;
        let mut best_len = 0;
        let mut best_value = contractions.value(root).unwrap_or(TableValue::Implicit);

        // непрерывная часть
        while contractions.has_children(node) {
            let Some(code) = self.codes.next() else {
                break;
            };

            match contractions.child(node, code) {
                Some(child) => {
                    self.work.matched.push(code);
                    node = child;

                    if let Some(value) = contractions.value(child) {
                        best_node = child;
                        best_len = self.work.matched.len();
                        best_value = value;
                    }
                }
                None => {
                    // предсоставленный символ может продолжать сокращение своей декомпозицией
                    if let Some(decomposition) = decomposition(code) {
                        if contractions.child(node, decomposition[0]).is_some() {
                            self.codes.unread(&decomposition);
                            continue;
                        }
                    }

                    self.codes.unread(&[code]);
                    break;
                }
            }
        }

        if self.work.matched.len() > best_len {
            self.codes.unread(&self.work.matched[best_len ..]);
        }

        // разрывная часть: незаблокированные нестартеры после совпавшей последовательности
        node = best_node;
        let mut max_skipped_ccc = 0;

        while contractions.has_children(node) {
            let Some(code) = self.codes.next() else {
                break;
            };

            let class = ccc(code);

            if class == 0 {
                if let Some(decomposition) = decomposition(code) {
                    if ccc(decomposition[0]) != 0 {
                        self.codes.unread(&decomposition);
                        continue;
                    }
                }

                self.codes.unread(&[code]);
                break;
            }

            if let Some(decomposition) = decomposition(code) {
                self.codes.unread(&decomposition);
                continue;
            }

            let accepted = match class > max_skipped_ccc {
                true => contractions
                    .child(node, code)
                    .and_then(|child| contractions.value(child).map(|value| (child, value))),
                false => None,
            };

            match accepted {
                Some((child, value)) => {
                    node = child;
                    best_value = value;
                }
                None => {
                    self.work.skipped.push(code);
                    max_skipped_ccc = max_skipped_ccc.max(class);
                }
            }
        }

        if !self.work.skipped.is_empty() {
            self.codes.unread(&self.work.skipped);
        }

        best_value
    }
}
