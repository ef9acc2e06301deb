//! Stack of open modals. Keyboard and outside-click handling only ever applies
//! to the top entry, and dismissal pops it.

use crate::models::{PageImage, QuestionId};

/// A modal surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Full-size view of a question image.
    ImageViewer { url: String },
    /// Paged image browser for a question.
    ImageBrowser { question_id: QuestionId },
    /// Preview of a browser image with select/cancel.
    ImagePreview {
        question_id: QuestionId,
        image: PageImage,
    },
}

/// Key events modals react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Enter,
}

/// What the caller should do after a key press or outside click.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    /// Nothing was open or the input does not apply.
    Ignored,
    /// The top modal was popped.
    Dismissed(Modal),
    /// Assign the previewed image to the question.
    SelectImage {
        question_id: QuestionId,
        image: PageImage,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn contains_browser(&self) -> bool {
        self.stack
            .iter()
            .any(|modal| matches!(modal, Modal::ImageBrowser { .. }))
    }

    /// Pop the preview and the browser beneath it.
    pub fn close_image_flow(&mut self) {
        self.stack.retain(|modal| {
            !matches!(
                modal,
                Modal::ImageBrowser { .. } | Modal::ImagePreview { .. }
            )
        });
    }

    /// Escape dismisses the top modal; Enter selects in an image preview.
    pub fn handle_key(&mut self, key: ModalKey) -> ModalAction {
        match (key, self.stack.last()) {
            (_, None) => ModalAction::Ignored,
            (ModalKey::Escape, Some(_)) => self
                .stack
                .pop()
                .map(ModalAction::Dismissed)
                .unwrap_or(ModalAction::Ignored),
            (ModalKey::Enter, Some(Modal::ImagePreview { question_id, image })) => {
                ModalAction::SelectImage {
                    question_id: *question_id,
                    image: image.clone(),
                }
            }
            (ModalKey::Enter, Some(_)) => ModalAction::Ignored,
        }
    }

    /// A click outside the top modal's content dismisses it.
    pub fn click_outside(&mut self) -> ModalAction {
        self.stack
            .pop()
            .map(ModalAction::Dismissed)
            .unwrap_or(ModalAction::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> PageImage {
        serde_json::from_value(serde_json::json!({"id": 1, "url": "/img/1.png"}))
            .expect("decode image")
    }

    #[test]
    fn escape_pops_only_top_modal() {
        let mut modals = ModalStack::default();
        modals.push(Modal::ImageBrowser { question_id: 4 });
        modals.push(Modal::ImagePreview {
            question_id: 4,
            image: image(),
        });
        assert!(matches!(
            modals.handle_key(ModalKey::Escape),
            ModalAction::Dismissed(Modal::ImagePreview { .. })
        ));
        assert_eq!(modals.top(), Some(&Modal::ImageBrowser { question_id: 4 }));
        assert!(matches!(
            modals.handle_key(ModalKey::Escape),
            ModalAction::Dismissed(Modal::ImageBrowser { .. })
        ));
        assert_eq!(modals.handle_key(ModalKey::Escape), ModalAction::Ignored);
    }

    #[test]
    fn enter_selects_only_in_preview() {
        let mut modals = ModalStack::default();
        modals.push(Modal::ImageViewer {
            url: "/img/q.png".to_string(),
        });
        assert_eq!(modals.handle_key(ModalKey::Enter), ModalAction::Ignored);
        modals.pop();

        modals.push(Modal::ImageBrowser { question_id: 9 });
        modals.push(Modal::ImagePreview {
            question_id: 9,
            image: image(),
        });
        assert_eq!(
            modals.handle_key(ModalKey::Enter),
            ModalAction::SelectImage {
                question_id: 9,
                image: image()
            }
        );
        assert_eq!(modals.len(), 2);
        modals.close_image_flow();
        assert!(modals.is_empty());
    }

    #[test]
    fn outside_click_dismisses_viewer() {
        let mut modals = ModalStack::default();
        modals.push(Modal::ImageViewer {
            url: "/img/q.png".to_string(),
        });
        assert!(matches!(
            modals.click_outside(),
            ModalAction::Dismissed(Modal::ImageViewer { .. })
        ));
        assert!(modals.is_empty());
    }
}
