//! Local BGE-M3 embedding model on candle.
//!
//! Loads tokenizer, config and weights from a model directory resolved at
//! startup; inference is masked mean pooling over the last hidden state
//! followed by L2 normalization, all on-device.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XLMRobertaConfig, XLMRobertaModel};
use tokenizers::Tokenizer;

use docqa_core::traits::TextEmbedder;

use crate::device::select_device;
use crate::pool::masked_mean_l2;
use crate::tokenize::tokenize_on_device;

pub(crate) const EMBEDDING_DIM: usize = 1024;
const MAX_TOKENS: usize = 256;

pub struct LocalModel {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl LocalModel {
    pub fn new() -> Result<Self> {
        let device = select_device();
        let model_dir = resolve_model_dir()?;
        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            anyhow!("failed to load tokenizer from {}: {}", tokenizer_path.display(), e)
        })?;
        let config_path = model_dir.join("config.json");
        let config: XLMRobertaConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
        let weights_path = model_dir.join("pytorch_model.bin");
        let weights = candle_core::pickle::read_all(&weights_path)?;
        let weights_map: std::collections::HashMap<String, Tensor> =
            weights.into_iter().collect();
        let vb = VarBuilder::from_tensors(weights_map, DType::F32, &device);
        let model = XLMRobertaModel::new(&config, vb)?;
        tracing::info!(model_dir = %model_dir.display(), "loaded local embedding model");
        Ok(Self { model, tokenizer, device })
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let (input_ids, attention_mask) =
            tokenize_on_device(&self.tokenizer, text, MAX_TOKENS, &self.device)?;
        let token_type_ids = Tensor::zeros((1, MAX_TOKENS), DType::I64, &self.device)?;
        let hidden = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let v: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if v.len() != EMBEDDING_DIM {
            return Err(anyhow!("unexpected embedding width: {}", v.len()));
        }
        Ok(v)
    }
}

impl TextEmbedder for LocalModel {
    fn dim(&self) -> usize {
        EMBEDDING_DIM
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed_text(text)?);
        }
        Ok(out)
    }
}

fn resolve_model_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("APP_MODEL_DIR") {
        let p = PathBuf::from(&dir);
        if p.exists() {
            return Ok(p);
        }
    }
    if let Ok(dir) = std::env::var("MODEL_DIR") {
        let p = PathBuf::from(&dir);
        if p.exists() {
            return Ok(p);
        }
    }
    for candidate in ["models/bge-m3", "../models/bge-m3"] {
        let p = Path::new(candidate);
        if p.exists() {
            return Ok(p.to_path_buf());
        }
    }
    Err(anyhow!(
        "could not locate BGE-M3 model directory; set APP_MODEL_DIR or APP_USE_FAKE_EMBEDDINGS=1"
    ))
}
