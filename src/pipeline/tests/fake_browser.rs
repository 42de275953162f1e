//! Scripted in-memory `Browser` used to exercise the pipeline without a
//! WebDriver session. Holds a paged catalog of fake items and mimics the
//! target site's modal open/close state machine.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::Value;

use crate::browser::Browser;
use crate::pipeline::assets;
use crate::selectors;

/// One question the fake site can serve.
#[derive(Debug, Clone)]
pub struct FakeItem {
    pub id: String,
    /// Inner HTML of the prompt container; None means the container is
    /// present but empty, the site's shape for stimulus-free items.
    pub prompt: Option<String>,
    /// Outer HTML of the question container; empty string simulates a
    /// missing container.
    pub question: String,
    pub domain: String,
    pub skill: String,
    pub difficulty: Option<String>,
    pub choices: Vec<String>,
    /// Text of the first rationale paragraph.
    pub rationale: String,
    pub explanation: String,
    pub figure_svg: Option<String>,
}

impl FakeItem {
    pub fn multiple_choice(id: &str, rationale: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: None,
            question: format!("<div class=\"question\"><p>Question {id}</p></div>"),
            domain: "Algebra".to_string(),
            skill: "Linear equations in one variable".to_string(),
            difficulty: Some("Easy".to_string()),
            choices: vec![
                "<p>1</p>".to_string(),
                "<p>2</p>".to_string(),
                "<p>3</p>".to_string(),
                "<p>4</p>".to_string(),
            ],
            rationale: rationale.to_string(),
            explanation: "The other choices do not satisfy the equation.".to_string(),
            figure_svg: None,
        }
    }

    pub fn free_response(id: &str, rationale: &str) -> Self {
        Self {
            choices: Vec::new(),
            ..Self::multiple_choice(id, rationale)
        }
    }

    /// Embeds a figure with the given svg into the question body.
    pub fn with_figure(mut self, svg: &str) -> Self {
        self.question = format!(
            "<div class=\"question\"><figure class=\"image\">{svg}</figure><p>Question {}</p></div>",
            self.id
        );
        self.figure_svg = Some(svg.to_string());
        self
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = Some(prompt.to_string());
        self
    }

    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }
}

struct State {
    pages: Vec<Vec<FakeItem>>,
    current_page: usize,
    open_item: Option<usize>,
}

pub struct FakeBrowser {
    state: Mutex<State>,
}

impl FakeBrowser {
    pub fn new(pages: Vec<Vec<FakeItem>>) -> Self {
        Self {
            state: Mutex::new(State {
                pages,
                current_page: 0,
                open_item: None,
            }),
        }
    }

    fn with_open_item<T>(&self, f: impl FnOnce(&mut FakeItem) -> T) -> Result<T> {
        let mut state = self.state.lock().unwrap();
        let page = state.current_page;
        let Some(index) = state.open_item else {
            bail!("no detail modal is open");
        };
        Ok(f(&mut state.pages[page][index]))
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn goto(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    async fn wait_for(&self, css: &str, _timeout: Duration) -> Result<()> {
        if css == selectors::QUESTION_INFO && self.state.lock().unwrap().open_item.is_none() {
            bail!("modal content never rendered");
        }
        Ok(())
    }

    async fn click(&self, css: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match css {
            selectors::CONSENT_CLOSE | selectors::SEARCH_BUTTON => Ok(()),
            selectors::MODAL_CLOSE => {
                state.open_item = None;
                Ok(())
            }
            selectors::NEXT_PAGE => {
                if state.current_page + 1 < state.pages.len() {
                    state.current_page += 1;
                    Ok(())
                } else {
                    bail!("next-page control not present")
                }
            }
            other => bail!("unexpected click on {other:?}"),
        }
    }

    async fn click_nth(&self, css: &str, index: usize) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match css {
            selectors::DOMAIN_CHECKBOXES => Ok(()),
            selectors::VIEW_QUESTION_BUTTONS => {
                let page = state.current_page;
                if index >= state.pages[page].len() {
                    bail!("no view button at index {index}");
                }
                state.open_item = Some(index);
                Ok(())
            }
            other => bail!("unexpected click_nth on {other:?}"),
        }
    }

    async fn click_last(&self, css: &str) -> Result<()> {
        if css == selectors::PAGE_SIZE_BUTTONS {
            Ok(())
        } else {
            bail!("unexpected click_last on {css:?}")
        }
    }

    async fn select_value(&self, css: &str, _value: &str) -> Result<()> {
        match css {
            selectors::ASSESSMENT_SELECT | selectors::TEST_SELECT => Ok(()),
            other => bail!("unexpected select on {other:?}"),
        }
    }

    async fn text(&self, _css: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn texts(&self, css: &str) -> Result<Vec<String>> {
        match css {
            selectors::VIEW_QUESTION_BUTTONS => {
                let state = self.state.lock().unwrap();
                let page = state.current_page;
                Ok(state.pages[page].iter().map(|i| i.id.clone()).collect())
            }
            selectors::LABEL_CELLS => self.with_open_item(|item| {
                vec![
                    "SAT".to_string(),
                    "Practice".to_string(),
                    item.domain.clone(),
                    item.skill.clone(),
                ]
            }),
            selectors::RATIONALE_PARAGRAPHS => self.with_open_item(|item| {
                if item.rationale.is_empty() {
                    Vec::new()
                } else {
                    vec![item.rationale.clone()]
                }
            }),
            _ => Ok(Vec::new()),
        }
    }

    async fn inner_html(&self, css: &str) -> Result<Option<String>> {
        match css {
            selectors::PROMPT => {
                self.with_open_item(|item| Some(item.prompt.clone().unwrap_or_default()))
            }
            selectors::RATIONALE_BODY => {
                self.with_open_item(|item| Some(item.explanation.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn outer_html(&self, css: &str) -> Result<Option<String>> {
        match css {
            selectors::QUESTION => self.with_open_item(|item| {
                if item.question.is_empty() {
                    None
                } else {
                    Some(item.question.clone())
                }
            }),
            selectors::PROMPT => self.with_open_item(|item| {
                item.prompt
                    .as_ref()
                    .map(|p| format!("<div class=\"prompt\">{p}</div>"))
            }),
            _ => Ok(None),
        }
    }

    async fn inner_htmls(&self, css: &str) -> Result<Vec<String>> {
        match css {
            selectors::CHOICE_ITEMS => self.with_open_item(|item| item.choices.clone()),
            _ => Ok(Vec::new()),
        }
    }

    async fn attr(&self, css: &str, name: &str) -> Result<Option<String>> {
        if css == selectors::DIFFICULTY && name == "aria-label" {
            self.with_open_item(|item| item.difficulty.clone())
        } else {
            Ok(None)
        }
    }

    async fn count(&self, css: &str) -> Result<usize> {
        match css {
            selectors::DOMAIN_CHECKBOXES => Ok(4),
            selectors::VIEW_QUESTION_BUTTONS => {
                let state = self.state.lock().unwrap();
                Ok(state.pages[state.current_page].len())
            }
            _ => Ok(0),
        }
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        if script == assets::FIGURE_SVG_SCRIPT {
            return self.with_open_item(|item| match &item.figure_svg {
                Some(svg) => Value::String(svg.clone()),
                None => Value::Null,
            });
        }
        if script == assets::REPLACE_FIGURE_SCRIPT {
            let Some(src) = args.first().and_then(Value::as_str).map(str::to_string) else {
                bail!("replace script called without a source argument");
            };
            return self.with_open_item(|item| {
                if let Some(svg) = item.figure_svg.take() {
                    let figure = format!("<figure class=\"image\">{svg}</figure>");
                    let img = format!("<img src=\"{src}\" alt=\"Stimulus Image\">");
                    item.question = item.question.replacen(&figure, &img, 1);
                }
                Value::Null
            });
        }
        bail!("unexpected script execution")
    }
}
