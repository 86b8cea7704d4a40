//! Auto-generated node labels: a, b, …, z, aa, ab, …, zz, aaa, …

use std::collections::HashSet;

/// The `index`-th label of the sequence (bijective base 26).
pub fn letter_label(index: usize) -> String {
	let mut n = index + 1;
	let mut out = Vec::new();
	while n > 0 {
		n -= 1;
		out.push(b'a' + (n % 26) as u8);
		n /= 26;
	}
	out.reverse();
	String::from_utf8(out).unwrap_or_default()
}

/// Earliest label in the sequence that is not in `used`.
pub fn next_free_label<'a>(used: impl IntoIterator<Item = &'a str>) -> String {
	let used: HashSet<&str> = used
		.into_iter()
		.filter(|label| is_letter_label(label))
		.collect();
	(0..=used.len())
		.map(letter_label)
		.find(|label| !used.contains(label.as_str()))
		.unwrap_or_else(|| letter_label(used.len()))
}

/// Whether `label` belongs to the generated alphabet (non-empty, `a`..=`z` only).
pub fn is_letter_label(label: &str) -> bool {
	!label.is_empty() && label.bytes().all(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(0, "a")]
	#[case(25, "z")]
	#[case(26, "aa")]
	#[case(27, "ab")]
	#[case(51, "az")]
	#[case(52, "ba")]
	#[case(701, "zz")]
	#[case(702, "aaa")]
	fn sequence_positions(#[case] index: usize, #[case] expected: &str) {
		assert_eq!(letter_label(index), expected);
	}

	#[test]
	fn picks_first_gap() {
		assert_eq!(next_free_label(["a", "b", "d"]), "c");
		assert_eq!(next_free_label(Vec::<&str>::new()), "a");
	}

	#[test]
	fn ignores_labels_outside_the_alphabet() {
		assert_eq!(next_free_label(["Start", "a", "node 1", "B"]), "b");
	}

	#[test]
	fn rolls_over_to_two_letters() {
		let used: Vec<String> = (0..26).map(letter_label).collect();
		assert_eq!(next_free_label(used.iter().map(String::as_str)), "aa");
	}

	proptest! {
		#[test]
		fn generated_labels_stay_unique(
			preset in proptest::collection::vec("[a-c]{1,2}", 0..12),
			count in 1usize..60,
		) {
			let mut used: Vec<String> = preset;
			let mut generated = HashSet::new();
			for _ in 0..count {
				let label = next_free_label(used.iter().map(String::as_str));
				prop_assert!(!used.contains(&label));
				prop_assert!(generated.insert(label.clone()));
				used.push(label);
			}
		}
	}
}
