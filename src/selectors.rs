//! CSS selectors for the question bank's current DOM shape.
//!
//! The target site offers no stability contract; if extraction starts
//! returning empty fields, diff these against the live page first.

/// Assessment-type dropdown on the search page.
pub const ASSESSMENT_SELECT: &str = "#selectAssessmentType";

/// Test-type dropdown; only rendered after the assessment is applied.
pub const TEST_SELECT: &str = "#selectTestType";

/// Close button on the cookie consent banner.
pub const CONSENT_CLOSE: &str = ".banner-close-button";

/// Domain checkboxes in the search form.
pub const DOMAIN_CHECKBOXES: &str = ".cb-checkbox input[type=\"checkbox\"]";

/// Search submit button.
pub const SEARCH_BUTTON: &str = "button.cb-btn.cb-btn-primary";

/// Paged results table container.
pub const RESULTS_TABLE: &str = "#results-table";

/// Page-size buttons; the last one is the largest size.
pub const PAGE_SIZE_BUTTONS: &str = ".page-size button";

/// Per-row buttons that open a question's detail modal. Their text is the
/// site-assigned question id.
pub const VIEW_QUESTION_BUTTONS: &str = ".view-question-button";

/// Next-page control below the results table.
pub const NEXT_PAGE: &str = "#undefined_next";

/// Content region of the detail modal; rendered once the modal has loaded.
pub const QUESTION_INFO: &str = ".question-info";

/// Modal close button.
pub const MODAL_CLOSE: &str = ".cb-glyph.cb-x-mark";

/// Optional stimulus container above the question body.
pub const PROMPT: &str = ".prompt";

/// Question body container. Always present on a well-formed item.
pub const QUESTION: &str = ".question";

/// Fixed-position label cells; domain is index 2, skill is index 3.
pub const LABEL_CELLS: &str = ".col-content";

/// Difficulty glyph; the level is in its aria-label.
pub const DIFFICULTY: &str = ".col-content .tqdifficulty";

/// Answer choice list items.
pub const CHOICE_ITEMS: &str = ".answer-choices li";

/// Rationale paragraphs; the first one names the correct choice.
pub const RATIONALE_PARAGRAPHS: &str = ".rationale p";

/// Rationale body holding the full explanation markup.
pub const RATIONALE_BODY: &str = ".rationale div";

/// Figure wrapping an embedded vector graphic, when the item has one.
pub const FIGURE: &str = "figure.image";
