use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ScoringError;
use crate::underwriting::config::SocialPolicy;
use crate::underwriting::domain::LoanApplication;
use crate::underwriting::sentiment::{SentimentError, SentimentScorer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialScore {
    pub sentiment_score: f64,
    pub business_activity: f64,
    pub risk_factors: Vec<String>,
    pub opportunities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sentiment and business-activity signals from the borrower's public posts.
#[derive(Clone)]
pub struct SocialSignalAnalyzer {
    sentiment: Arc<dyn SentimentScorer>,
    policy: SocialPolicy,
}

impl SocialSignalAnalyzer {
    pub fn new(sentiment: Arc<dyn SentimentScorer>, policy: SocialPolicy) -> Self {
        let policy = SocialPolicy {
            business_keywords: policy
                .business_keywords
                .iter()
                .map(|keyword| keyword.to_lowercase())
                .collect(),
            ..policy
        };
        Self { sentiment, policy }
    }

    pub fn analyze(&self, application: &LoanApplication) -> SocialScore {
        match self.try_analyze(application) {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "social analysis degraded to neutral");
                SocialScore {
                    error: Some(err.to_string()),
                    ..SocialScore::default()
                }
            }
        }
    }

    fn try_analyze(&self, application: &LoanApplication) -> Result<SocialScore, ScoringError> {
        let social = application.social()?;
        let posts = match social.posts {
            Some(posts) if !posts.is_empty() => posts,
            _ => return Ok(SocialScore::default()),
        };

        let mut polarity_sum = 0.0;
        for post in &posts {
            let polarity = self.sentiment.polarity(post)?;
            if !polarity.is_finite() {
                return Err(SentimentError::NonFinite(post.clone()).into());
            }
            polarity_sum += polarity.clamp(-1.0, 1.0);
        }
        let sentiment_score = polarity_sum / posts.len() as f64;
        let business_activity = self.business_activity(&posts);

        let policy = &self.policy;
        let mut risk_factors = Vec::new();
        if sentiment_score < policy.negative_sentiment_below {
            risk_factors.push("Negative social media sentiment".to_string());
        }
        if business_activity < policy.low_activity_below {
            risk_factors.push("Low business activity".to_string());
        }

        let mut opportunities = Vec::new();
        if sentiment_score > policy.positive_sentiment_above {
            opportunities.push("Strong positive online presence".to_string());
        }
        if business_activity > policy.high_activity_above {
            opportunities.push("High business engagement".to_string());
        }

        Ok(SocialScore {
            sentiment_score,
            business_activity,
            risk_factors,
            opportunities,
            error: None,
        })
    }

    fn business_activity(&self, posts: &[String]) -> f64 {
        if posts.is_empty() {
            return 0.0;
        }

        let mentions = posts
            .iter()
            .filter(|post| {
                let lowered = post.to_lowercase();
                self.policy
                    .business_keywords
                    .iter()
                    .any(|keyword| lowered.contains(keyword.as_str()))
            })
            .count();

        mentions as f64 / posts.len() as f64
    }
}
