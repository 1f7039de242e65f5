mod test_color;
mod test_text;
