// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Prompt templates for the text generator

use super::SuggestionMode;
use crate::models::{RecommendationResult, UserMetrics};

/// Build the prompt for the given mode
pub fn build_prompt(
    mode: SuggestionMode,
    metrics: &UserMetrics,
    recommendations: &RecommendationResult,
) -> String {
    match mode {
        SuggestionMode::SearchQueries => search_query_prompt(metrics, recommendations),
        SuggestionMode::FreeAdvice => free_advice_prompt(metrics, recommendations),
    }
}

/// Prompt asking for 3-5 YouTube search queries as markdown bullets only
pub fn search_query_prompt(metrics: &UserMetrics, recommendations: &RecommendationResult) -> String {
    format!(
        "You are a search assistant. A user has received lifestyle recommendations.\n\
         Your ONLY task is to provide specific YouTube video search queries to help them act on these recommendations.\n\
         \n\
         {data}\n\
         \n\
         {given}\n\
         \n\
         **Your Task:**\n\
         - Based *only* on the user's data and the recommendations, generate a list of 3-5 specific YouTube video search queries.\n\
         - **Do not** provide any other text, advice, or motivational speech.\n\
         - **Do not** number the list. Use *only* markdown bullets (e.g., `- Search query`).\n\
         - Tailor the queries to the user's *specific problem*.\n\
         - Be specific (e.g., \"10-minute beginner workout\" is better than \"workout\").\n\
         \n\
         **Example Output Format (use this format exactly):**\n\
         - 15-minute beginner bodyweight workout\n\
         - How to drink 3 liters of water a day\n\
         - Healthy high-protein meal prep for the week\n",
        data = user_data_block(metrics),
        given = recommendations_block(recommendations),
    )
}

/// Prompt asking for 2-3 new motivational tips
pub fn free_advice_prompt(metrics: &UserMetrics, recommendations: &RecommendationResult) -> String {
    format!(
        "You are a friendly and encouraging lifestyle coach. A user has received lifestyle recommendations.\n\
         \n\
         {data}\n\
         \n\
         {given}\n\
         \n\
         **Your Task:**\n\
         - Give 2-3 new, practical and motivational tips that help the user act on these recommendations.\n\
         - **Do not** repeat the recommendations already given.\n\
         - Keep each tip short and specific to the user's data.\n\
         - Format the answer as markdown.\n",
        data = user_data_block(metrics),
        given = recommendations_block(recommendations),
    )
}

fn user_data_block(metrics: &UserMetrics) -> String {
    format!(
        "**User's Data:**\n\
         - BMI: {:.2}\n\
         - Water Intake: {} liters/day\n\
         - Workout Frequency: {} days/week\n\
         - Exercise Type: {}\n\
         - Daily Meals: {}",
        metrics.bmi,
        metrics.water_liters,
        metrics.workout_days_per_week,
        metrics.exercise_type,
        metrics.meals_per_day,
    )
}

fn recommendations_block(recommendations: &RecommendationResult) -> String {
    let lines: Vec<String> = recommendations
        .messages()
        .map(|message| format!("- {message}"))
        .collect();
    format!("**Recommendations Already Given:**\n{}", lines.join("\n"))
}
