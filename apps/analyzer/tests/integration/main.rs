mod helpers;
mod test_analyze_image;
mod test_detect_text;
