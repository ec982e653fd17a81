use rand::seq::SliceRandom;
use rand::Rng;

use crate::room_aggregator::RoomTally;
use crate::svg_parser::OpeningCounts;

/// Which caption variant to emit. One composer serves both; the styles
/// differ only in phrase-assembly sophistication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionStyle {
    /// Bedroom/bathroom counts inside the template (zeroes included),
    /// remaining rooms appended as an "including ..." clause.
    Basic,
    /// Every non-zero category phrased with its count, open-plan
    /// merging, and synonym draws for the framing words.
    Rich,
}

const BASIC_TEMPLATES: [&str; 4] = [
    "floor plan drawing of an apartment with {bedrooms} bedrooms and {bathrooms} bathrooms{connectivity}, top-down architectural blueprint",
    "top-down apartment floor plan showing {bedrooms} bedrooms and {bathrooms} bathrooms{connectivity}",
    "black and white 2D architectural floor plan of an apartment with {bedrooms} bedrooms and {bathrooms} bathrooms{connectivity}",
    "apartment layout floor plan, top view, with {bedrooms} bedrooms and {bathrooms} bathrooms{connectivity}",
];

const RICH_TEMPLATES: [&str; 4] = [
    "top-down {apt_word} {fp_word} showing {core_desc}, rendered as a clean black-and-white architectural drawing with {doors_phrase}{windows_phrase}",
    "{fp_word_cap} of a {apt_word} that contains {core_desc}, drawn in a monochrome architectural style with {doors_phrase}{windows_phrase}",
    "black-and-white {fp_word} of a {apt_word} featuring {core_desc}; the layout includes {doors_phrase}{windows_phrase}",
    "architectural {fp_word} of a {apt_word}, top-down view, with {core_desc} and {doors_phrase}{windows_phrase}",
];

// Near-synonyms drawn per caption so a large dataset does not repeat
// the same framing words on every line.
const APARTMENT_WORDS: [&str; 3] = ["apartment", "flat", "residential unit"];
const FLOOR_PLAN_WORDS: [&str; 3] = ["floor plan", "layout", "blueprint"];

/// "1 bedroom" / "2 bedrooms". A zero count produces an empty phrase
/// that callers drop entirely. `plural` overrides the default
/// `<singular>s` form for irregular wording.
pub fn plural_phrase(n: usize, singular: &str, plural: Option<&str>) -> String {
    if n == 0 {
        return String::new();
    }
    if n == 1 {
        return format!("1 {}", singular);
    }

    match plural {
        Some(p) => format!("{} {}", n, p),
        None => format!("{} {}s", n, singular),
    }
}

/// Join the non-empty parts with the separator.
pub fn join_non_empty(parts: &[String], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(sep)
}

/// Compose the caption for one drawing from its tally, its open-plan
/// flag, and its opening counts.
///
/// Never fails for a valid (possibly all-zero) tally. The only
/// non-determinism is the explicit draws taken from `rng`.
pub fn build_caption<R: Rng>(
    tally: &RoomTally,
    open_plan: bool,
    openings: OpeningCounts,
    style: CaptionStyle,
    rng: &mut R,
) -> String {
    match style {
        CaptionStyle::Basic => build_basic_caption(tally, open_plan, openings, rng),
        CaptionStyle::Rich => build_rich_caption(tally, open_plan, openings, rng),
    }
}

fn build_basic_caption<R: Rng>(
    tally: &RoomTally,
    open_plan: bool,
    openings: OpeningCounts,
    rng: &mut R,
) -> String {
    let connectivity = if open_plan {
        ", open kitchen connected to living room"
    } else {
        ""
    };

    let bedrooms = tally.bedrooms.to_string();
    let bathrooms = tally.total_bathrooms().to_string();

    let template = choose(&BASIC_TEMPLATES, rng);
    let mut caption = fill_template(
        template,
        &[
            ("bedrooms", bedrooms.as_str()),
            ("bathrooms", bathrooms.as_str()),
            ("connectivity", connectivity),
        ],
    );

    let mut extras: Vec<String> = Vec::new();
    if tally.kitchens > 0 {
        extras.push("a kitchen".to_string());
    }
    if tally.living_rooms > 0 {
        extras.push("a living room".to_string());
    }
    if tally.corridors > 0 {
        extras.push("corridors".to_string());
    }
    if tally.outdoor > 0 {
        extras.push("a balcony or outdoor area".to_string());
    }
    if tally.bathrooms_shower == 1 {
        extras.push("one bathroom with shower".to_string());
    } else if tally.bathrooms_shower > 1 {
        extras.push(format!("{} bathrooms with shower", tally.bathrooms_shower));
    }

    if !extras.is_empty() {
        caption.push_str(&format!(", including {}", extras.join(", ")));
    }

    if openings.doors > 0 || openings.windows > 0 {
        caption.push_str(&format!(
            ", {} doors and {} windows",
            openings.doors, openings.windows
        ));
    }

    caption
}

fn build_rich_caption<R: Rng>(
    tally: &RoomTally,
    open_plan: bool,
    openings: OpeningCounts,
    rng: &mut R,
) -> String {
    let bedroom_phrase = plural_phrase(tally.bedrooms, "bedroom", None);

    let mut bathroom_phrase = plural_phrase(tally.total_bathrooms(), "bathroom", None);
    if tally.bathrooms_shower > 0 {
        let shower_text = if tally.bathrooms_shower == 1 {
            "one with shower".to_string()
        } else {
            format!("{} with shower", tally.bathrooms_shower)
        };
        // e.g. "2 bathrooms including one with shower"
        bathroom_phrase = format!("{} including {}", bathroom_phrase, shower_text);
    }

    let mut kitchen_phrase = plural_phrase(tally.kitchens, "kitchen", None);
    let mut living_phrase = plural_phrase(tally.living_rooms, "living room", None);
    let corridor_phrase = plural_phrase(tally.corridors, "corridor", None);
    let outdoor_phrase = plural_phrase(tally.outdoor, "balcony or outdoor area", None);

    // Open-plan merging replaces the separate kitchen and living phrases
    // with one combined phrase so the same rooms are not mentioned twice.
    // Applied before joining.
    let mut open_plan_phrase = String::new();
    if open_plan && tally.kitchens > 0 && tally.living_rooms > 0 {
        open_plan_phrase = format!(
            "{} connected to {}",
            plural_phrase(tally.kitchens, "open-plan kitchen", None),
            plural_phrase(tally.living_rooms, "living room", None)
        );
        kitchen_phrase.clear();
        living_phrase.clear();
    }

    let core_desc = join_non_empty(
        &[
            bedroom_phrase,
            bathroom_phrase,
            open_plan_phrase,
            kitchen_phrase,
            living_phrase,
            corridor_phrase,
            outdoor_phrase,
        ],
        ", ",
    );

    let mut doors_phrase = plural_phrase(openings.doors, "door", None);
    let mut windows_phrase = plural_phrase(openings.windows, "window", None);
    if !doors_phrase.is_empty() && !windows_phrase.is_empty() {
        // "11 doors and 4 windows"
        windows_phrase = format!(" and {}", windows_phrase);
    } else if doors_phrase.is_empty() && windows_phrase.is_empty() {
        doors_phrase = "no specified openings".to_string();
    }

    let apt_word = choose(&APARTMENT_WORDS, rng);
    let fp_word = choose(&FLOOR_PLAN_WORDS, rng);
    let fp_word_cap = capitalize(fp_word);

    let template = choose(&RICH_TEMPLATES, rng);
    fill_template(
        template,
        &[
            ("apt_word", apt_word),
            ("fp_word", fp_word),
            ("fp_word_cap", fp_word_cap.as_str()),
            ("core_desc", core_desc.as_str()),
            ("doors_phrase", doors_phrase.as_str()),
            ("windows_phrase", windows_phrase.as_str()),
        ],
    )
}

/// One uniform draw. The tables are compile-time constants, so an empty
/// one is a defect in this file.
fn choose<'a, R: Rng>(options: &'a [&'a str], rng: &mut R) -> &'a str {
    options
        .choose(rng)
        .copied()
        .expect("option table must not be empty")
}

/// Substitute `{name}` slots in a template. Slots the template does not
/// use are ignored; a marker still present after substitution means the
/// static template table and the slot list disagree, which is a
/// programming error and panics.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut caption = template.to_string();
    for (name, value) in slots {
        caption = caption.replace(&format!("{{{}}}", name), value);
    }

    if let Some(start) = caption.find('{') {
        let end = caption[start..]
            .find('}')
            .map(|i| start + i + 1)
            .unwrap_or(caption.len());
        panic!(
            "caption template slot left unfilled: {}",
            &caption[start..end]
        );
    }

    caption
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
