use serde::Serialize;

/// Grouping shown in the option picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Core,
    Content,
    Visual,
    Audio,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Core, Category::Content, Category::Visual, Category::Audio];

    pub fn label(self) -> &'static str {
        match self {
            Category::Core => "Core",
            Category::Content => "Content",
            Category::Visual => "Visual",
            Category::Audio => "Audio",
        }
    }
}

/// One selectable element of a summary.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryOption {
    pub id: u32,
    pub label: &'static str,
    pub description: &'static str,
    /// Selecting this option asks the user for a focus topic.
    pub requires_input: bool,
    pub category: Category,
}

const fn opt(id: u32, label: &'static str, description: &'static str, category: Category) -> SummaryOption {
    SummaryOption {
        id,
        label,
        description,
        requires_input: false,
        category,
    }
}

/// Timestamp table option.
pub const TIMESTAMPS: u32 = 2;
/// Focus-topic option; needs a topic.
pub const SPECIFIC_TOPIC: u32 = 5;
/// Quote table option.
pub const KEY_QUOTES: u32 = 9;
/// Comparison-with-other-videos option.
pub const RELATED_CONTENT: u32 = 11;

pub static SUMMARY_OPTIONS: [SummaryOption; 17] = [
    opt(1, "TL;DR", "1-2 sentence summary at the top.", Category::Core),
    opt(TIMESTAMPS, "Timestamps", "Approximate timestamps for key points.", Category::Core),
    opt(3, "Actionable Insights", "List of tips, tools, or advice.", Category::Content),
    opt(4, "Separate Speakers", "Organize summary by speaker.", Category::Content),
    SummaryOption {
        id: SPECIFIC_TOPIC,
        label: "Specific Topic",
        description: "Focus on one specific topic.",
        requires_input: true,
        category: Category::Content,
    },
    opt(6, "Tone Analysis", "Describe the speaker's tone/sentiment.", Category::Content),
    opt(7, "Step-by-Step Guide", "Format insights as a tutorial.", Category::Content),
    opt(8, "Comprehensive", "Detailed summary of all key points.", Category::Core),
    opt(KEY_QUOTES, "Key Quotes", "2-3 significant quotes with context.", Category::Content),
    opt(10, "Audience Takeaways", "Benefits for specific audience groups.", Category::Content),
    opt(RELATED_CONTENT, "Related Content", "Compare to similar videos.", Category::Content),
    opt(12, "Visual Elements", "Summarize graphics & overlays.", Category::Visual),
    opt(13, "Visual Style", "Aesthetic, colors, editing style.", Category::Visual),
    opt(14, "Visual Data", "Extract data from charts/graphs.", Category::Visual),
    opt(15, "Audio Narration", "Analyze narration style.", Category::Audio),
    opt(16, "Background Audio", "Music and sound effects summary.", Category::Audio),
    opt(17, "Audio Cues", "Moments emphasized by sound.", Category::Audio),
];

/// Look up an option by id.
pub fn find(id: u32) -> Option<&'static SummaryOption> {
    SUMMARY_OPTIONS.iter().find(|o| o.id == id)
}

/// Options grouped by category, in catalog order.
pub fn by_category() -> Vec<(Category, Vec<&'static SummaryOption>)> {
    Category::ALL
        .iter()
        .map(|&cat| {
            let opts = SUMMARY_OPTIONS.iter().filter(|o| o.category == cat).collect();
            (cat, opts)
        })
        .collect()
}
