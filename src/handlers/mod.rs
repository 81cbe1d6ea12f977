pub mod function_call;
