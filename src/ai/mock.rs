use super::{validate_edit_request, ImageEditService};
use crate::error::EditFailure;
use crate::models::ImageData;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockImageEditor {
    responses: Arc<Mutex<Vec<std::result::Result<String, EditFailure>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageEditor {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, base64: String) -> Self {
        self.responses.lock().unwrap().push(Ok(base64));
        self
    }

    pub fn with_failure(self, failure: EditFailure) -> Self {
        self.responses.lock().unwrap().push(Err(failure));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageEditService for MockImageEditor {
    async fn edit_image(&self, image: &ImageData, prompt: &str) -> Result<String> {
        validate_edit_request(image, prompt)?;

        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Echo the original image back as the "edit"
            Ok(image.base64.clone())
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone().map_err(Error::Edit)
        }
    }
}
