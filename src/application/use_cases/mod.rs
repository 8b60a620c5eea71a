pub mod dataset_filter;
pub mod evaluation;
pub mod linear_svm;
pub mod model_training;
pub mod review_cleaning;
pub mod sentiment_model;
pub mod stratified_split;
pub mod text_cleaner;
pub mod tfidf_vectorizer;
pub mod training_dataset;
